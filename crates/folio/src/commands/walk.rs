use std::cell::Cell;
use std::fmt;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use folio::config::Config;
use folio::graph::{SlideGraph, build_graph};
use folio::nav::{FitOptions, Navigator, Viewport};
use folio::splash::{LoadingTimer, SplashEvent};
use folio::theme::{Palette, ThemeMode};
use inquire::{InquireError, Select};

use crate::render::{self, TerminalViewport};

/// One entry of the move prompt.
enum Choice {
    Go {
        label: &'static str,
        target: String,
        title: String,
    },
    Orbit {
        id: String,
        name: String,
    },
    Jump,
    Theme(ThemeMode),
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Go { label, title, .. } => write!(f, "{label}  ({title})"),
            Choice::Orbit { name, .. } => write!(f, "◆ {name}"),
            Choice::Jump => write!(f, "Jump to…"),
            Choice::Theme(mode) => write!(f, "Theme: {mode}"),
            Choice::Quit => write!(f, "Quit"),
        }
    }
}

struct JumpTarget {
    id: String,
    title: String,
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {}", self.id, self.title)
    }
}

pub fn run(
    deck: Option<PathBuf>,
    start: Option<String>,
    padding: Option<f64>,
    no_splash: bool,
) -> Result<()> {
    let mut fit = FitOptions::default();
    if let Some(padding) = padding {
        ensure!(
            padding.is_finite() && padding >= 0.0,
            "padding must be a non-negative number, got {padding}"
        );
        fit.padding = padding;
    }

    let config = Config::load_or_default();
    let deck = super::load_deck(deck, &config)?;
    let graph = build_graph(&deck, &config.layout_config(), config.strategy())?;
    let mut theme = super::theme_controller(&config);

    if config.splash_enabled() && !no_splash && std::io::stderr().is_terminal() {
        let mut timer = LoadingTimer::default();
        if !splash(&mut std::io::stderr(), &theme.palette(), &mut timer) {
            log::debug!("loading screen ended early");
        }
    }

    let start = start.unwrap_or_else(|| deck.start.clone());
    let mut nav = Navigator::new(&graph, &start, deck.main_sequence.clone(), config.progress_policy())?
        .with_fit(fit);
    let shown = Rc::new(Cell::new(nav.progress()));
    let sink = Rc::clone(&shown);
    nav.subscribe(Box::new(move |value| sink.set(value)));

    let mut viewport = TerminalViewport::default();
    viewport.recenter(&nav.initial_fit());

    loop {
        let node = graph
            .node(nav.current())
            .with_context(|| format!("'{}' vanished from the graph", nav.current()))?;
        println!("\n{}\n", render::slide(node, shown.get(), &theme.palette()));

        let choices = choices(&nav, &graph, theme.mode().cycled());
        let choice = match Select::new("Move", choices).with_page_size(10).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match choice {
            Choice::Go { target, .. } => {
                nav.navigate_to(&target, &mut viewport)?;
            }
            Choice::Orbit { id, .. } => {
                nav.navigate_to(&id, &mut viewport)?;
            }
            Choice::Jump => {
                if let Some(id) = jump(&graph)? {
                    nav.navigate_to(&id, &mut viewport)?;
                }
            }
            Choice::Theme(mode) => theme.set_mode(mode),
            Choice::Quit => break,
        }
    }
    Ok(())
}

fn choices(nav: &Navigator, graph: &SlideGraph, next_theme: ThemeMode) -> Vec<Choice> {
    let title = |id: &str| graph.node(id).map(|n| n.title.clone()).unwrap_or_default();

    let mut out: Vec<Choice> = nav
        .links()
        .iter()
        .map(|link| Choice::Go {
            label: link.label(),
            target: link.target().to_string(),
            title: title(link.target()),
        })
        .collect();
    out.extend(graph.satellites_of(nav.current()).map(|s| Choice::Orbit {
        id: s.id.clone(),
        name: s.title.clone(),
    }));
    out.push(Choice::Jump);
    out.push(Choice::Theme(next_theme));
    out.push(Choice::Quit);
    out
}

fn jump(graph: &SlideGraph) -> Result<Option<String>> {
    let targets: Vec<JumpTarget> = graph
        .nodes
        .iter()
        .map(|n| JumpTarget {
            id: n.id.clone(),
            title: n.title.clone(),
        })
        .collect();
    match Select::new("Jump to", targets).with_page_size(15).prompt() {
        Ok(target) => Ok(Some(target.id)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Draw the loading screen until the timer completes. Returns `false` when
/// the timer ended without completing, e.g. because `out` stopped accepting
/// writes; the timer is cancelled in that case.
fn splash(out: &mut dyn Write, palette: &Palette, timer: &mut LoadingTimer) -> bool {
    loop {
        let value = match timer.tick() {
            SplashEvent::Progress(value) => value,
            SplashEvent::Complete => 100.0,
            SplashEvent::Idle => return false,
        };
        if let Err(e) = write!(out, "{}", render::splash_frame(value, palette)).and_then(|()| out.flush()) {
            log::debug!("splash: {e}");
            timer.cancel();
            return false;
        }
        if timer.is_finished() {
            std::thread::sleep(timer.completion_delay());
            // The frame is already complete; a lost newline only affects layout.
            let _ = writeln!(out);
            return true;
        }
        std::thread::sleep(timer.interval());
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use super::*;

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn splash_stops_when_output_fails() {
        let mut timer = LoadingTimer::new(Duration::ZERO, 4);
        assert!(!splash(&mut ClosedTerminal, &Palette::dark(), &mut timer));
        assert!(timer.is_finished());
        assert!(timer.value() < 100.0);
        assert_eq!(timer.tick(), SplashEvent::Idle);
    }

    #[test]
    fn splash_draws_to_completion() {
        let mut timer = LoadingTimer::new(Duration::ZERO, 2);
        let mut out = Vec::new();
        assert!(splash(&mut out, &Palette::light(), &mut timer));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Loading"));
        assert!(text.contains("100%"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn theme_choice_carries_the_next_mode() {
        let deck = folio::deck::builtin::portfolio().unwrap();
        let graph = build_graph(&deck, &Default::default(), Default::default()).unwrap();
        let nav = Navigator::new(&graph, &deck.start, deck.main_sequence.clone(), Default::default())
            .unwrap();

        let next = ThemeMode::System.cycled();
        let theme = choices(&nav, &graph, next)
            .into_iter()
            .find_map(|c| match c {
                Choice::Theme(mode) => Some(mode),
                _ => None,
            })
            .unwrap();
        assert_eq!(theme, next);
        assert_eq!(Choice::Theme(next).to_string(), format!("Theme: {}", next.as_str()));
    }
}
