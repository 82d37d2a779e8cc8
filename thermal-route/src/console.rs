//! Line commands for the headless console driver.
//!
//! ```text
//! start <lat> <lon>
//! end <lat> <lon>
//! clear start|end
//! time <YYYY-MM-DD> <HH>
//! legend
//! quit
//! ```

use chrono::NaiveDate;

use crate::domain::{InvalidWaypoint, TargetTime, TimeError, Waypoint};
use crate::sync::InputEvent;

/// Error returned for a line that is not a valid command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0}")]
    Number(String),

    #[error(transparent)]
    Waypoint(#[from] InvalidWaypoint),

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Change an input of the route controller.
    Input(InputEvent),
    /// Print the thermal legend.
    Legend,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    ///
    /// ```
    /// use thermal_route::console::Command;
    /// use thermal_route::sync::InputEvent;
    ///
    /// let cmd = Command::parse("clear end").unwrap();
    /// assert_eq!(cmd, Some(Command::Input(InputEvent::EndCleared)));
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "start" => Command::Input(InputEvent::StartSelected(waypoint(
                &args,
                "start <lat> <lon>",
            )?)),
            "end" => Command::Input(InputEvent::EndSelected(waypoint(
                &args,
                "end <lat> <lon>",
            )?)),
            "clear" => match args.as_slice() {
                ["start"] => Command::Input(InputEvent::StartCleared),
                ["end"] => Command::Input(InputEvent::EndCleared),
                _ => return Err(CommandError::Usage("clear start|end")),
            },
            "time" => Command::Input(InputEvent::TimeChanged(target_time(&args)?)),
            "legend" if args.is_empty() => Command::Legend,
            "legend" => return Err(CommandError::Usage("legend")),
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn waypoint(args: &[&str], usage: &'static str) -> Result<Waypoint, CommandError> {
    let [lat, lon] = args else {
        return Err(CommandError::Usage(usage));
    };
    Ok(Waypoint::new(number(lon)?, number(lat)?)?)
}

fn number(s: &str) -> Result<f64, CommandError> {
    s.parse().map_err(|_| CommandError::Number(s.to_string()))
}

fn target_time(args: &[&str]) -> Result<TargetTime, CommandError> {
    const USAGE: &str = "time <YYYY-MM-DD> <HH>";
    let [date, hour] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| CommandError::Usage(USAGE))?;
    let hour: u32 = hour.parse().map_err(|_| CommandError::Number(hour.to_string()))?;
    Ok(TargetTime::from_date_hour(date, hour)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(line: &str) -> InputEvent {
        match Command::parse(line) {
            Ok(Some(Command::Input(event))) => event,
            other => panic!("expected input event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn waypoints_are_lat_then_lon() {
        let InputEvent::StartSelected(wp) = input("start 1.3521 103.8198") else {
            panic!("wrong event");
        };
        assert_eq!(wp.latitude(), 1.3521);
        assert_eq!(wp.longitude(), 103.8198);

        assert!(matches!(input("end -33.9 151.2"), InputEvent::EndSelected(_)));
    }

    #[test]
    fn clear_commands() {
        assert_eq!(input("clear start"), InputEvent::StartCleared);
        assert_eq!(input("  clear   end "), InputEvent::EndCleared);
        assert_eq!(
            Command::parse("clear both"),
            Err(CommandError::Usage("clear start|end"))
        );
    }

    #[test]
    fn time_command() {
        let InputEvent::TimeChanged(time) = input("time 2026-10-19 14") else {
            panic!("wrong event");
        };
        assert_eq!(time.to_param(), "2026-10-19-1400");
    }

    #[test]
    fn bad_hour_is_rejected() {
        assert!(matches!(
            Command::parse("time 2026-10-19 24"),
            Err(CommandError::Time(_))
        ));
        assert!(matches!(
            Command::parse("time 2026-10-19 noon"),
            Err(CommandError::Number(_))
        ));
        assert_eq!(
            Command::parse("time 19/10/2026 14"),
            Err(CommandError::Usage("time <YYYY-MM-DD> <HH>"))
        );
    }

    #[test]
    fn out_of_range_waypoint() {
        assert!(matches!(
            Command::parse("start 91 0"),
            Err(CommandError::Waypoint(_))
        ));
        assert_eq!(
            Command::parse("end 1.0 east"),
            Err(CommandError::Number("east".into()))
        );
        assert_eq!(
            Command::parse("end 1.0"),
            Err(CommandError::Usage("end <lat> <lon>"))
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(Command::parse("legend"), Ok(Some(Command::Legend)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(
            Command::parse("route"),
            Err(CommandError::Unknown("route".into()))
        );
    }
}
