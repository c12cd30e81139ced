use crate::terminal::TerminalSize;
use crate::ui::renderer::RenderFrame;
use crate::ui::style::Color;

pub fn frame_to_json(frame: &RenderFrame, size: TerminalSize) -> serde_json::Value {
    let cursor = frame.cursor.map(|c| {
        serde_json::json!({
            "row": c.row,
            "col": c.col,
        })
    });

    let lines = frame
        .lines
        .iter()
        .map(|line| {
            serde_json::Value::Array(
                line.iter()
                    .map(|span| {
                        serde_json::json!({
                            "text": span.text,
                            "style": {
                                "color": span.style.color.map(color_to_json),
                                "background": span.style.background.map(color_to_json),
                                "bold": span.style.bold,
                                "underline": span.style.underline,
                            }
                        })
                    })
                    .collect(),
            )
        })
        .collect::<Vec<_>>();

    let regions = frame
        .regions
        .iter()
        .map(|region| {
            serde_json::json!({
                "id": region.id,
                "start_row": region.start_row,
                "height": region.height,
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "terminal": {
            "width": size.width,
            "height": size.height,
        },
        "cursor": cursor,
        "lines": lines,
        "regions": regions,
    })
}

fn color_to_json(color: Color) -> serde_json::Value {
    match color {
        Color::Reset => serde_json::json!("reset"),
        Color::Black => serde_json::json!("black"),
        Color::DarkGrey => serde_json::json!("dark_grey"),
        Color::Red => serde_json::json!("red"),
        Color::Green => serde_json::json!("green"),
        Color::Yellow => serde_json::json!("yellow"),
        Color::Blue => serde_json::json!("blue"),
        Color::Magenta => serde_json::json!("magenta"),
        Color::Cyan => serde_json::json!("cyan"),
        Color::White => serde_json::json!("white"),
        Color::Rgb(r, g, b) => serde_json::json!({
            "rgb": [r, g, b]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::frame_to_json;
    use crate::core::NodeId;
    use crate::terminal::{CursorPos, TerminalSize};
    use crate::ui::renderer::{FieldRegion, RenderFrame};
    use crate::ui::span::Span;
    use crate::ui::style::{Color, Style};

    #[test]
    fn highlighted_spans_keep_their_style() {
        let frame = RenderFrame {
            lines: vec![vec![
                Span::new("  "),
                Span::styled("Ca", Style::new().bold().underline()),
                Span::styled("nada", Style::new().background(Color::Cyan)),
            ]],
            cursor: Some(CursorPos { col: 3, row: 0 }),
            regions: vec![FieldRegion {
                id: NodeId::from("country"),
                start_row: 0,
                height: 1,
            }],
        };
        let json = frame_to_json(
            &frame,
            TerminalSize {
                width: 40,
                height: 10,
            },
        );

        assert_eq!(json["terminal"]["width"], 40);
        assert_eq!(json["cursor"]["col"], 3);
        assert_eq!(json["lines"][0][1]["text"], "Ca");
        assert_eq!(json["lines"][0][1]["style"]["underline"], true);
        assert_eq!(json["lines"][0][2]["style"]["background"], "cyan");
        assert!(json["lines"][0][0]["style"]["color"].is_null());
        assert_eq!(json["regions"][0]["id"], "country");
    }
}
