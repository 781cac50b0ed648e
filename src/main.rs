//! Apply a sequence of UI events to a fresh session and print the final view.
//!
//! Usage: life2070 [energy=90] [screen=health] [explore] [reset] ...
//!
//! Arguments are applied left to right. The starting profile and screen come
//! from the environment (see `Config::from_env`).

use anyhow::{bail, Context, Result};

use life2070::config::Config;
use life2070::{Session, UiEvent};

fn parse_arg(arg: &str) -> Result<UiEvent> {
    match arg {
        "explore" => return Ok(UiEvent::Explore),
        "reset" => return Ok(UiEvent::Reset),
        _ => {}
    }
    let Some((key, value)) = arg.split_once('=') else {
        bail!("expected key=value, explore or reset, got {:?}", arg);
    };
    if key == "screen" {
        return Ok(UiEvent::Navigate {
            screen: value.to_string(),
        });
    }
    let value: i64 = value
        .trim()
        .parse()
        .with_context(|| format!("value for {} is not an integer: {:?}", key, value))?;
    Ok(UiEvent::SetMetric {
        key: key.to_string(),
        value,
    })
}

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut session = Session::new(&cfg);

    let events = std::env::args()
        .skip(1)
        .map(|a| parse_arg(&a))
        .collect::<Result<Vec<_>>>()?;

    for event in events {
        let desc = format!("{:?}", event);
        session
            .apply(event)
            .with_context(|| format!("applying {}", desc))?;
    }

    let out = serde_json::to_string_pretty(&session.snapshot())?;
    println!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_arg("explore").unwrap(), UiEvent::Explore);
        assert_eq!(
            parse_arg("energy=90").unwrap(),
            UiEvent::SetMetric { key: "energy".into(), value: 90 }
        );
        assert_eq!(
            parse_arg("screen=health").unwrap(),
            UiEvent::Navigate { screen: "health".into() }
        );
        assert!(parse_arg("energy=high").is_err());
        assert!(parse_arg("energy").is_err());
    }
}
