//! Path-description decoding.
//!
//! A path description is tokenized into command letters and numeric runs,
//! then folded into [`PathCommand`] values. Each drawn command contributes
//! its endpoint(s) to the decoded point list. A command whose coordinates
//! cannot be read is skipped and reported as a [`SegmentIssue`]; the rest of
//! the path still decodes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;

/// One parsed drawing command with absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    Move(Point),
    /// Control points followed by the drawn endpoint (last element).
    Curve(SmallVec<[Point; 3]>),
    /// One or more drawn vertices.
    Line(SmallVec<[Point; 1]>),
    Close,
}

impl PathCommand {
    /// Points this command contributes to the decoded sequence.
    #[must_use]
    pub fn drawn_points(&self) -> SmallVec<[Point; 1]> {
        match self {
            Self::Move(point) => SmallVec::from_elem(*point, 1),
            Self::Curve(points) => points.last().copied().into_iter().collect(),
            Self::Line(points) => points.clone(),
            Self::Close => SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentIssueKind {
    /// Fewer than one full coordinate pair followed the command.
    MissingCoordinates,
    /// An odd number of values followed the command.
    UnpairedCoordinate,
    /// A token could not be read as a finite number.
    MalformedNumber,
    /// The command letter is not one the decoder understands.
    UnsupportedCommand,
}

/// A single command that contributed no point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentIssue {
    pub command_index: usize,
    pub command: char,
    pub kind: SegmentIssueKind,
}

/// Outcome of decoding one path description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDecoding {
    pub points: Vec<Point>,
    pub issues: Vec<SegmentIssue>,
}

impl PathDecoding {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
    Malformed,
}

fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte.is_ascii_whitespace() || byte == b',' {
            pos += 1;
        } else if byte.is_ascii_alphabetic() {
            tokens.push(Token::Command(char::from(byte)));
            pos += 1;
        } else if byte.is_ascii_digit() || matches!(byte, b'.' | b'+' | b'-') {
            let end = scan_number(bytes, pos);
            let token = input[pos..end]
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map_or(Token::Malformed, Token::Number);
            tokens.push(token);
            pos = end;
        } else {
            tokens.push(Token::Malformed);
            // Skip the whole UTF-8 sequence so slicing stays on char boundaries.
            pos += input[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    tokens
}

/// Returns the end offset of the numeric literal starting at `start`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            pos = exp;
        }
    }
    pos.max(start + 1)
}

fn pair_up(values: &[f64]) -> SmallVec<[Point; 3]> {
    values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Parses a path description into commands.
///
/// Commands seen before the first move letter are dropped, so a path
/// without a move yields no commands at all. A move whose coordinates
/// cannot be read is reported but still opens the path.
#[must_use]
pub fn parse_path_commands(description: &str) -> (Vec<PathCommand>, Vec<SegmentIssue>) {
    let tokens = tokenize(description);
    let mut commands = Vec::new();
    let mut issues = Vec::new();
    let mut started = false;

    let mut pos = 0;
    let mut command_index = 0;
    while pos < tokens.len() {
        let Token::Command(letter) = tokens[pos] else {
            // Numbers with no owning command are ignored.
            pos += 1;
            continue;
        };
        pos += 1;

        let mut run: SmallVec<[f64; 6]> = SmallVec::new();
        let mut malformed = false;
        while let Some(token) = tokens.get(pos) {
            match *token {
                Token::Command(_) => break,
                Token::Number(value) => run.push(value),
                Token::Malformed => malformed = true,
            }
            pos += 1;
        }

        let parsed = build_command(letter, &run, malformed);
        let index = command_index;
        command_index += 1;
        if letter == 'M' {
            started = true;
        }

        match parsed {
            Ok(command) => {
                if started {
                    commands.push(command);
                }
            }
            Err(kind) => issues.push(SegmentIssue {
                command_index: index,
                command: letter,
                kind,
            }),
        }
    }

    (commands, issues)
}

fn build_command(
    letter: char,
    run: &[f64],
    malformed: bool,
) -> Result<PathCommand, SegmentIssueKind> {
    if matches!(letter, 'Z' | 'z') {
        return Ok(PathCommand::Close);
    }
    if !matches!(letter, 'M' | 'C' | 'L') {
        return Err(SegmentIssueKind::UnsupportedCommand);
    }
    if malformed {
        return Err(SegmentIssueKind::MalformedNumber);
    }
    if run.len() < 2 {
        return Err(SegmentIssueKind::MissingCoordinates);
    }
    if run.len() % 2 != 0 {
        return Err(SegmentIssueKind::UnpairedCoordinate);
    }

    let points = pair_up(run);
    Ok(match letter {
        'M' => PathCommand::Move(points[0]),
        'C' => PathCommand::Curve(points),
        _ => PathCommand::Line(points.into_iter().collect()),
    })
}

/// Decodes a path description into its ordered drawn endpoints.
#[must_use]
pub fn decode_path(description: &str) -> PathDecoding {
    let (commands, issues) = parse_path_commands(description);
    let points = commands
        .iter()
        .flat_map(PathCommand::drawn_points)
        .collect();
    PathDecoding { points, issues }
}
