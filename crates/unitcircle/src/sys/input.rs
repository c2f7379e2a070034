use crate::events::AppEvent;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Command {
    #[strum(serialize = "angle", serialize = "a", serialize = "set")]
    Angle,
    #[strum(serialize = "step", serialize = "s")]
    Step,
    #[strum(serialize = "+", serialize = "up")]
    Up,
    #[strum(serialize = "-", serialize = "down")]
    Down,
    #[strum(serialize = "redraw", serialize = "r")]
    Redraw,
    #[strum(serialize = "quit", serialize = "q", serialize = "exit")]
    Quit,
}

/// Parses one line of the control protocol:
///
/// - `angle <radians>`, or just `<radians>`
/// - `step <n>`, `+`, `-`
/// - `redraw`, `quit`
///
/// Blank or unrecognised lines yield `None`.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let head = words.next()?;

    if let Ok(angle) = head.parse::<f64>() {
        return words.next().is_none().then_some(AppEvent::SetAngle(angle));
    }

    let command: Command = head.parse().ok()?;
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    match (command, arg) {
        (Command::Angle, Some(value)) => value.parse().ok().map(AppEvent::SetAngle),
        (Command::Step, Some(count)) => count.parse().ok().map(AppEvent::Step),
        (Command::Up, None) => Some(AppEvent::Step(1)),
        (Command::Down, None) => Some(AppEvent::Step(-1)),
        (Command::Redraw, None) => Some(AppEvent::Redraw),
        (Command::Quit, None) => Some(AppEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("1.5", Some(AppEvent::SetAngle(1.5))),
            ("  -0.25  ", Some(AppEvent::SetAngle(-0.25))),
            ("angle 3", Some(AppEvent::SetAngle(3.0))),
            ("SET -1", Some(AppEvent::SetAngle(-1.0))),
            ("step -4", Some(AppEvent::Step(-4))),
            ("+", Some(AppEvent::Step(1))),
            ("-", Some(AppEvent::Step(-1))),
            ("r", Some(AppEvent::Redraw)),
            ("Quit", Some(AppEvent::Quit)),
            ("", None),
            ("angle", None),
            ("angle abc", None),
            ("step 1.5", None),
            ("1.0 2.0", None),
            ("quit now", None),
            ("jump", None),
        ];

        for (line, expected) in cases {
            assert_eq!(parse_line(line), expected, "line {line:?}");
        }
    }
}
