use std::{collections::VecDeque, fmt, io::BufRead, path::Path};

use tokio::sync::mpsc;

use crate::{core::Point, Board};

/// Input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Request a solve for the target.
    Target(Point),
    /// Stop the event loop.
    Quit,
}

/// Input line could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid target '{}', expected 'x,y' or 'x y'", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parse a single input line.
///
/// A line holds either a target as two coordinates separated by a comma or
/// whitespace, or a quit command. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Event>, ParseError> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(None);
    }

    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Ok(Some(Event::Quit));
    }

    let mut coords = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>);

    match (coords.next(), coords.next(), coords.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
            Ok(Some(Event::Target(Point::new(x, y))))
        }
        _ => Err(ParseError(line.to_string())),
    }
}

/// Read target requests from a line based reader.
///
/// Malformed lines and targets outside the board are dropped with a warning.
/// Reading stops on end of input, on a quit command or when the receiving
/// end has gone away. A quit event is always sent last.
///
/// This call blocks and must run on its own thread, outside the runtime.
/// A pending read on standard input cannot be cancelled, so the thread is
/// left behind when the process exits.
pub fn read_lines<R: BufRead>(reader: R, board: Board, tx: mpsc::Sender<Event>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(Event::Target(target))) if !board.contains(&target) => {
                warn!(
                    "Target ({}, {}) lies outside the board",
                    target.x, target.y
                );
            }
            Ok(Some(Event::Quit)) => break,
            Ok(Some(event)) => {
                if tx.blocking_send(event).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }

    tx.blocking_send(Event::Quit).ok();
}

/// Program of target requests.
///
/// A program file is a JSON array of `[x, y]` pairs, replayed in order.
pub struct Program(VecDeque<Point>);

impl Program {
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let str = std::fs::read_to_string(path)?;
        let targets: VecDeque<Point> = serde_json::from_str::<Vec<[f64; 2]>>(&str)?
            .iter()
            .map(|v| Point::new(v[0], v[1]))
            .collect();

        Ok(Self(targets))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Send every target in the program, followed by a quit event.
    ///
    /// Targets outside the board are dropped with a warning.
    pub async fn replay(self, board: Board, tx: mpsc::Sender<Event>) {
        for target in self.0 {
            if !board.contains(&target) {
                warn!(
                    "Target ({}, {}) lies outside the board",
                    target.x, target.y
                );
                continue;
            }

            if tx.send(Event::Target(target)).await.is_err() {
                return;
            }
        }

        tx.send(Event::Quit).await.ok();
    }
}

impl FromIterator<Point> for Program {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
