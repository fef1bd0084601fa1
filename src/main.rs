// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wedding_gallery::app::{self, paths, Flags};
use wedding_gallery::config;

const DEFAULT_LOG_FILTER: &str = "info,wedding_gallery=debug";

const HELP: &str = "\
Usage: wedding_gallery [OPTIONS] <DIRECTORY | IMAGE...>

Arguments:
  <DIRECTORY>   Folder of .webp/.jpg/.jpeg/.png photos (thumbnails/ is used when present)
  <IMAGE...>    Photo paths or URLs, in display order

Options:
  --lang <ID>          UI language, e.g. en-US or ko
  --config-dir <DIR>   Directory holding settings.toml
  --write-config       Write the effective settings.toml and exit
  -h, --help           Print this help
";

fn main() -> iced::Result {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang = parse_optional(&mut args, "--lang");
    paths::init_cli_override(parse_optional(&mut args, "--config-dir"));

    if args.contains("--write-config") {
        write_config();
        return Ok(());
    }

    let sources = args
        .finish()
        .into_iter()
        .filter_map(|arg| match arg.into_string() {
            Ok(arg) => Some(arg),
            Err(arg) => {
                tracing::warn!(?arg, "ignoring non UTF-8 argument");
                None
            }
        })
        .collect();

    app::run(Flags { lang, sources })
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_optional(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        tracing::warn!("ignoring {key}: {err}");
        None
    })
}

/// Saves the current settings (defaults filled in) for hand editing.
fn write_config() {
    let (config, _warning) = config::load();
    match config::save(&config) {
        Ok(()) => match paths::get_app_config_dir() {
            Some(dir) => println!("{}", dir.join("settings.toml").display()),
            None => tracing::warn!("no config directory available; nothing written"),
        },
        Err(err) => tracing::error!("failed to write settings: {err}"),
    }
}
