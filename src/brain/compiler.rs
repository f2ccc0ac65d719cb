use crate::brain::instruction::{Condition, Instruction, SenseDir, Turn};
use crate::brain::Brain;
use crate::config::{MARKER_COUNT, MAX_STATES};
use crate::error::CompileError;
use tracing::debug;

/// A parsed line plus the raw marker id, kept unclamped for range checks
#[derive(Debug)]
struct ParsedLine {
    line: usize,
    instruction: Instruction,
    marker: Option<u32>,
}

/// Compile brain source into an instruction table.
///
/// Lines are lower-cased and stripped of `;` comments. Blank lines take no
/// state index. Compilation is all-or-nothing.
pub fn compile(source: &str) -> Result<Brain, CompileError> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");

    let mut parsed: Vec<ParsedLine> = Vec::new();
    for (i, raw) in normalized.split('\n').enumerate() {
        let line = i + 1;
        let text = strip_comment(raw).trim().to_lowercase();

        match parse_line(&text) {
            Some((instruction, marker)) => parsed.push(ParsedLine {
                line,
                instruction,
                marker,
            }),
            None if text.is_empty() => {}
            None => return Err(CompileError::MalformedInstruction { line, text }),
        }

        if parsed.len() > MAX_STATES {
            return Err(CompileError::TooManyStates {
                line,
                limit: MAX_STATES,
            });
        }
    }

    if parsed.is_empty() {
        return Err(CompileError::EmptyBrain);
    }

    let highest = (parsed.len() - 1) as u32;
    for p in &parsed {
        let referenced = p.instruction.max_target();
        if referenced > highest {
            return Err(CompileError::StateOutOfRange {
                line: p.line,
                referenced,
            });
        }
        if let Some(marker) = p.marker {
            if marker >= MARKER_COUNT as u32 {
                return Err(CompileError::MarkerOutOfRange {
                    line: p.line,
                    marker,
                });
            }
        }
    }

    debug!(states = parsed.len(), "compiled brain");
    Ok(Brain::new(parsed.into_iter().map(|p| p.instruction).collect()))
}

#[inline]
fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Decimal number with leading zeros stripped; `None` if it does not fit a `u32`
fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match token.trim_start_matches('0') {
        "" => Some(0),
        digits => digits.parse().ok(),
    }
}

#[inline]
fn clamp_marker(raw: u32) -> u8 {
    u8::try_from(raw).unwrap_or(u8::MAX)
}

/// Parse one normalized line, dispatching on its two-character prefix.
/// Returns the instruction and the raw marker id it references, if any.
fn parse_line(line: &str) -> Option<(Instruction, Option<u32>)> {
    let tokens: Vec<&str> = line.split(' ').collect();
    match line.get(..2)? {
        "se" => parse_sense(&tokens),
        "ma" | "un" => parse_mark(&tokens),
        "pi" | "mo" => parse_branch(&tokens),
        "dr" => match tokens.as_slice() {
            ["drop", next] => Some((
                Instruction::Drop {
                    next: parse_number(next)?,
                },
                None,
            )),
            _ => None,
        },
        "tu" => match tokens.as_slice() {
            ["turn", turn, next] => Some((
                Instruction::Turn {
                    turn: turn.parse::<Turn>().ok()?,
                    next: parse_number(next)?,
                },
                None,
            )),
            _ => None,
        },
        "fl" => match tokens.as_slice() {
            ["flip", p, st1, st2] => Some((
                Instruction::Flip {
                    p: parse_number(p)?,
                    on_zero: parse_number(st1)?,
                    otherwise: parse_number(st2)?,
                },
                None,
            )),
            _ => None,
        },
        _ => None,
    }
}

fn parse_sense(tokens: &[&str]) -> Option<(Instruction, Option<u32>)> {
    let (dir, st1, st2, cond, marker) = match tokens {
        ["sense", dir, st1, st2, cond] => (dir, st1, st2, cond.parse::<Condition>().ok()?, None),
        ["sense", dir, st1, st2, "marker", id] => {
            // a single digit only; 6-9 are rejected later as out of range
            let &[digit] = id.as_bytes() else {
                return None;
            };
            if !digit.is_ascii_digit() {
                return None;
            }
            let m = u32::from(digit - b'0');
            (dir, st1, st2, Condition::Marker(m as u8), Some(m))
        }
        _ => return None,
    };
    Some((
        Instruction::Sense {
            dir: dir.parse::<SenseDir>().ok()?,
            cond,
            on_true: parse_number(st1)?,
            on_false: parse_number(st2)?,
        },
        marker,
    ))
}

fn parse_mark(tokens: &[&str]) -> Option<(Instruction, Option<u32>)> {
    let [op, marker, next] = tokens else {
        return None;
    };
    let raw = parse_number(marker)?;
    let next = parse_number(next)?;
    let marker = clamp_marker(raw);
    let instruction = match *op {
        "mark" => Instruction::Mark { marker, next },
        "unmark" => Instruction::Unmark { marker, next },
        _ => return None,
    };
    Some((instruction, Some(raw)))
}

fn parse_branch(tokens: &[&str]) -> Option<(Instruction, Option<u32>)> {
    let [op, st1, st2] = tokens else {
        return None;
    };
    let on_success = parse_number(st1)?;
    let on_fail = parse_number(st2)?;
    let instruction = match *op {
        "pickup" => Instruction::PickUp {
            on_success,
            on_fail,
        },
        "move" => Instruction::Move {
            on_success,
            on_fail,
        },
        _ => return None,
    };
    Some((instruction, None))
}
