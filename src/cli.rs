use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Stargazing report notifier for Sagamihara";

const LONG_ABOUT: &str = "
Fetches the night's stargazing conditions (cloud cover, starry-sky index, precipitation, moon age)
and pushes a formatted report to an ntfy.sh topic.

Meant to run from cron or a CI schedule: each invocation checks whether the current time falls in a
notification window (a morning slot around 06:30, or the half hour starting one hour before sunset)
and exits quietly otherwise.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, help = "Send the report even outside a notification window")]
    pub force: bool,

    #[arg(long, help = "Print the report to stdout instead of posting it")]
    pub dry_run: bool,
}
