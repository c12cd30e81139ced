use crate::core::search::Match;
use crate::ui::highlight::render_text_spans;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

const ACTIVE_MARKER: &str = "› ";
const IDLE_MARKER: &str = "  ";

/// Lines for the suggestion list box, one per match, indented to `indent`
/// columns so the list sits under the input value. Empty when there are no
/// matches, which hides the list.
pub fn list_lines(
    matches: &[Match],
    selected: Option<usize>,
    indent: u16,
    theme: &Theme,
) -> Vec<SpanLine> {
    let pad = " ".repeat((indent as usize).saturating_sub(ACTIVE_MARKER.chars().count()));
    matches
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let active = selected == Some(index);
            let (marker, style) = if active {
                (ACTIVE_MARKER, theme.active_item)
            } else {
                (IDLE_MARKER, theme.item)
            };
            let mut line = vec![Span::new(format!("{pad}{marker}"))];
            line.extend(render_text_spans(
                &item.text,
                &item.ranges,
                style,
                theme.match_highlight,
            ));
            line
        })
        .collect()
}

pub fn live_region_line(text: &str, indent: u16, theme: &Theme) -> SpanLine {
    vec![Span::styled(
        format!("{}[status] {text}", " ".repeat(indent as usize)),
        theme.live_region,
    )]
}

/// Maps a field-local row to a list index. Row 0 is the input line.
pub fn item_at_row(row: u16, count: usize) -> Option<usize> {
    let index = (row as usize).checked_sub(1)?;
    (index < count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::{item_at_row, list_lines};
    use crate::core::search::Match;
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;

    fn matched(text: &str, ranges: Vec<(usize, usize)>) -> Match {
        Match {
            index: 0,
            text: text.to_string(),
            ranges,
        }
    }

    #[test]
    fn active_item_gets_marker_and_style() {
        let theme = Theme::default_theme();
        let matches = vec![matched("Canada", vec![(0, 2)]), matched("Cameroon", vec![(0, 2)])];
        let lines = list_lines(&matches, Some(1), 4, &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "    Canada");
        assert_eq!(line_text(&lines[1]), "  › Cameroon");
        let active_tail = lines[1].last().expect("span");
        assert_eq!(active_tail.style.background, theme.active_item.background);
    }

    #[test]
    fn matched_span_is_styled_distinctly() {
        let theme = Theme::default_theme();
        let lines = list_lines(&[matched("Chad", vec![(0, 2)])], None, 2, &theme);
        let spans = &lines[0];
        assert_eq!(spans[1].text, "Ch");
        assert!(spans[1].style.bold);
        assert_eq!(spans[2].text, "ad");
        assert!(!spans[2].style.bold);
    }

    #[test]
    fn empty_list_draws_nothing() {
        assert!(list_lines(&[], None, 4, &Theme::default_theme()).is_empty());
    }

    #[test]
    fn rows_map_to_items_below_the_input() {
        assert_eq!(item_at_row(0, 3), None);
        assert_eq!(item_at_row(1, 3), Some(0));
        assert_eq!(item_at_row(3, 3), Some(2));
        assert_eq!(item_at_row(4, 3), None);
    }
}
