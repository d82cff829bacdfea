//! ANSI terminal output of rendered rows.

use colored::{ColoredString, Colorize};

use crate::config::{ColorMode, RenderConfig};
use crate::rows::{CellStyle, DiffStats, Rendered};

const MIN_COLUMN_WIDTH: usize = 4;
const SEPARATOR: &str = " │ ";

/// Writes [`Rendered`] rows as terminal text.
pub struct TerminalRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Render rows to a string, one terminal line per row.
    ///
    /// The stats footer is written only when `stats` is given and the
    /// configuration enables it.
    pub fn render(&self, rendered: &Rendered, stats: Option<DiffStats>) -> String {
        let mut out = String::new();
        match rendered {
            Rendered::Inline { rows } => {
                for row in rows {
                    out.push_str(&self.paint(&row.display(), row.style));
                    out.push('\n');
                }
            }
            Rendered::Split { header, rows } => {
                let width = self.config.column_width.max(MIN_COLUMN_WIDTH);
                let head = format!(
                    "{}{SEPARATOR}{}",
                    pad(&fit(&header.left, width), width),
                    fit(&header.right, width)
                );
                out.push_str(&self.bold(&head));
                out.push('\n');
                out.push_str(&"─".repeat(width * 2 + SEPARATOR.chars().count()));
                out.push('\n');
                for row in rows {
                    let left = pad(&fit(row.left.display(), width), width);
                    let right = fit(row.right.display(), width);
                    out.push_str(&self.paint(&left, row.left.style));
                    out.push_str(SEPARATOR);
                    out.push_str(&self.paint(&right, row.right.style));
                    out.push('\n');
                }
            }
        }
        if let Some(stats) = stats.filter(|_| self.config.show_stats) {
            out.push_str(&format!(
                "{} {} ={}\n",
                self.paint(&format!("+{}", stats.additions), CellStyle::Added),
                self.paint(&format!("-{}", stats.removals), CellStyle::Removed),
                stats.unchanged
            ));
        }
        out
    }

    fn paint(&self, text: &str, style: CellStyle) -> String {
        match self.config.color {
            ColorMode::Off => text.to_string(),
            ColorMode::Basic => match style {
                CellStyle::Plain => text.to_string(),
                CellStyle::Added => text.green().to_string(),
                CellStyle::Removed => text.red().to_string(),
                CellStyle::Media => text.cyan().to_string(),
            },
            ColorMode::Truecolor => {
                let Some(treatment) = self.config.palette.treatment(style) else {
                    return text.to_string();
                };
                let mut painted = ColoredString::from(text);
                if let Some((r, g, b)) = treatment.foreground_rgb() {
                    painted = painted.truecolor(r, g, b);
                }
                if let Some((r, g, b)) = treatment.background_rgb() {
                    painted = painted.on_truecolor(r, g, b);
                }
                painted.to_string()
            }
        }
    }

    fn bold(&self, text: &str) -> String {
        match self.config.color {
            ColorMode::Off => text.to_string(),
            ColorMode::Basic | ColorMode::Truecolor => text.bold().to_string(),
        }
    }
}

/// Truncate to `width` characters, ending in `…` when cut.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::rows::{render, BLANK};
    use revdiff_diff::diff_lines;

    fn plain(layout: Layout, width: usize) -> RenderConfig {
        RenderConfig {
            layout,
            column_width: width,
            color: ColorMode::Off,
            ..Default::default()
        }
    }

    #[test]
    fn inline_plain_text() {
        let script = diff_lines(&["a", "b", ""], &["a", "x", ""]);
        let rendered = render(Some(&script), Layout::Inline, "v1", "v2");
        let config = plain(Layout::Inline, 60);
        let out = TerminalRenderer::new(&config).render(&rendered, None);
        assert_eq!(out, format!("a\n- b\n+ x\n{BLANK}\n"));
    }

    #[test]
    fn split_plain_text() {
        let script = diff_lines(&["a", "b"], &["a"]);
        let rendered = render(Some(&script), Layout::Split, "v1", "v2");
        let config = plain(Layout::Split, 6);
        let out = TerminalRenderer::new(&config).render(&rendered, None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "v1     │ v2");
        assert_eq!(lines[1].chars().count(), 15);
        assert_eq!(lines[2], "a      │ a");
        assert_eq!(lines[3], format!("b      │ {BLANK}"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("abc", 5), "abc");
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn stats_footer_respects_config() {
        let script = diff_lines(&["a", "b"], &["a", "c"]);
        let rendered = render(Some(&script), Layout::Inline, "", "");
        let stats = crate::rows::DiffStats::from_script(&script);

        let config = plain(Layout::Inline, 60);
        let out = TerminalRenderer::new(&config).render(&rendered, Some(stats));
        assert!(out.ends_with("+1 -1 =1\n"));

        let quiet = RenderConfig {
            show_stats: false,
            ..plain(Layout::Inline, 60)
        };
        let out = TerminalRenderer::new(&quiet).render(&rendered, Some(stats));
        assert!(!out.contains("=1"));
    }

    #[test]
    fn colors_are_applied() {
        colored::control::set_override(true);
        let script = diff_lines(&["a"], &["b"]);
        let rendered = render(Some(&script), Layout::Inline, "", "");

        let basic = RenderConfig::default();
        let basic_out = TerminalRenderer::new(&basic).render(&rendered, None);
        assert!(basic_out.contains("\u{1b}["), "expected ANSI escapes in {basic_out:?}");

        // Palette colours carry a background, basic colours do not.
        let truecolor = RenderConfig {
            color: ColorMode::Truecolor,
            ..Default::default()
        };
        let true_out = TerminalRenderer::new(&truecolor).render(&rendered, None);
        assert!(true_out.contains("\u{1b}["));
        assert_ne!(basic_out, true_out);
        colored::control::unset_override();
    }
}
