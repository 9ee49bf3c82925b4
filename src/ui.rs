use owo_colors::OwoColorize;

use crate::error::QueryError;
use crate::poller::{Observation, Scrape};

/// Print a scrape as one block per instrument group.
pub fn render_scrape(scrape: &Scrape, use_color: bool) {
  render_group("base", &scrape.base, use_color);
  if let Some(extended) = &scrape.extended {
    render_group("rpmetrics", extended, use_color);
  }
}

fn render_group(
  label: &str,
  group: &Result<Vec<Observation>, QueryError>,
  use_color: bool,
) {
  match group {
    Ok(observations) => {
      if use_color {
        println!("{} {}", "✔".green().bold(), label.bold());
      } else {
        println!("OK {label}");
      }
      for observation in observations {
        render_observation(observation, use_color);
      }
    }
    Err(err) => {
      if use_color {
        println!("{} {}", "✖".red().bold(), label.bold());
        println!("  {} {}", "⚠ ERROR".yellow().bold(), err.red().bold());
      } else {
        println!("ERR {label}");
        println!("  ERROR {err}");
      }
    }
  }

  println!();
}

fn render_observation(observation: &Observation, use_color: bool) {
  let attributes = observation
    .attributes
    .iter()
    .map(|(key, value)| format!("{key}=\"{value}\""))
    .collect::<Vec<_>>()
    .join(",");
  let labels = if attributes.is_empty() {
    String::new()
  } else {
    format!("{{{attributes}}}")
  };

  if use_color {
    println!(
      "  {}{} {}",
      observation.name.cyan(),
      labels.dimmed(),
      observation.value.bold()
    );
  } else {
    println!("  {}{} {}", observation.name, labels, observation.value);
  }
}
