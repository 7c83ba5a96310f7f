//! Terminal drawing of slides, progress and the splash screen.

use colored::{ColoredString, Colorize};
use folio::deck::Block;
use folio::graph::{GraphNode, NodeKind};
use folio::nav::{RecenterCommand, Viewport};
use folio::theme::{Palette, Rgb};

const TEXT_WIDTH: usize = 72;
const BAR_WIDTH: usize = 40;

/// Viewport of the terminal front end. The whole slide is redrawn after every
/// move, so re-centering only has to remember where the camera points.
#[derive(Debug, Default)]
pub struct TerminalViewport {
    pub focus: Option<RecenterCommand>,
}

impl Viewport for TerminalViewport {
    fn recenter(&mut self, command: &RecenterCommand) {
        log::debug!(
            "camera: '{}' over {} ms, padding {:.2}",
            command.target,
            command.duration_ms,
            command.padding
        );
        self.focus = Some(command.clone());
    }
}

fn paint(text: &str, color: Rgb) -> ColoredString {
    text.truecolor(color.r, color.g, color.b)
}

/// Greedy word wrap.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Number of filled cells for `value` percent of a `width`-cell bar.
pub fn filled_cells(value: f32, width: usize) -> usize {
    ((value.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize
}

pub fn progress_bar(value: f32, palette: &Palette) -> String {
    let filled = filled_cells(value, BAR_WIDTH);
    let mut bar = String::new();
    for i in 0..BAR_WIDTH {
        if i < filled {
            let stop = palette.gradient[i * palette.gradient.len() / BAR_WIDTH];
            bar.push_str(&paint("█", stop).to_string());
        } else {
            bar.push_str(&paint("░", palette.track).to_string());
        }
    }
    format!("{bar} {:>3.0}%", value)
}

fn meter(level: u8, palette: &Palette) -> String {
    let filled = filled_cells(level as f32, 20);
    format!(
        "{}{} {level:>3}%",
        paint(&"█".repeat(filled), palette.accent),
        paint(&"░".repeat(20 - filled), palette.track)
    )
}

fn block(block: &Block, palette: &Palette, out: &mut Vec<String>) {
    match block {
        Block::Heading { text, level } => {
            let text = if *level <= 1 { text.to_uppercase() } else { text.clone() };
            out.push(paint(&text, palette.title).bold().to_string());
        }
        Block::Paragraph { text } => {
            out.extend(wrap(text, TEXT_WIDTH).iter().map(|l| paint(l, palette.foreground).to_string()));
        }
        Block::BadgeList { label, items } => {
            if let Some(label) = label {
                out.push(paint(label, palette.muted).bold().to_string());
            }
            let badges: Vec<String> = items
                .iter()
                .map(|item| paint(&format!("[{item}]"), palette.accent).to_string())
                .collect();
            out.push(badges.join(" "));
        }
        Block::StatCards { cards } => {
            for card in cards {
                let icon = card.icon.as_deref().unwrap_or("•");
                out.push(format!(
                    "{icon} {} {}",
                    paint(&format!("{}:", card.label), palette.muted),
                    paint(&card.value, palette.foreground).bold()
                ));
            }
        }
        Block::Timeline { entries } => {
            for entry in entries {
                out.push(format!(
                    "{} {}  {}",
                    paint("●", palette.accent),
                    paint(&entry.period, palette.muted),
                    paint(&entry.title, palette.foreground).bold()
                ));
                for line in wrap(&entry.detail, TEXT_WIDTH - 4) {
                    out.push(format!("    {}", paint(&line, palette.foreground)));
                }
            }
        }
        Block::Meters { label, items } => {
            if let Some(label) = label {
                out.push(paint(label, palette.muted).bold().to_string());
            }
            let name_width = items.iter().map(|m| m.name.chars().count()).max().unwrap_or(0);
            for item in items {
                out.push(format!(
                    "{:<name_width$}  {}",
                    item.name,
                    meter(item.level, palette)
                ));
            }
        }
        Block::Contacts { items } => {
            for contact in items {
                let icon = contact.icon.as_deref().unwrap_or("•");
                out.push(format!(
                    "{icon} {:<9} {}",
                    contact.label,
                    paint(&contact.value, palette.accent)
                ));
            }
        }
        Block::Image { src, alt } => {
            let caption = if alt.is_empty() { src.as_str() } else { alt.as_str() };
            out.push(format!("[image: {caption}]").dimmed().to_string());
        }
    }
}

/// Full-screen rendering of the focused node.
pub fn slide(node: &GraphNode, progress: f32, palette: &Palette) -> String {
    let mut lines = Vec::new();
    let rule = paint(&"─".repeat(TEXT_WIDTH), palette.track).to_string();

    let badge = match node.kind {
        NodeKind::Slide => String::new(),
        NodeKind::Card => format!(" {}", paint("(project)", palette.muted)),
        NodeKind::Satellite => format!(" {}", paint("(skill)", palette.muted)),
    };
    lines.push(format!("{}{badge}", paint(&node.title, palette.title).bold()));
    if let Some(subtitle) = &node.subtitle {
        lines.push(paint(subtitle, palette.subtitle).to_string());
    }
    lines.push(rule.clone());

    for b in &node.content {
        block(b, palette, &mut lines);
        lines.push(String::new());
    }
    if let Some(orbit) = &node.orbit {
        lines.push(format!(
            "{} {} of {} around '{}'",
            orbit.icon.as_deref().unwrap_or("◆"),
            orbit.index + 1,
            orbit.count,
            orbit.hub
        ));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.push(progress_bar(progress, palette));
    lines.join("\n")
}

/// One frame of the loading screen, drawn over the previous one.
pub fn splash_frame(value: f32, palette: &Palette) -> String {
    format!("\r{} {}", paint("Loading", palette.title).bold(), progress_bar(value, palette))
}
