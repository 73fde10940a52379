use std::io::Write;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::clipboard::{ClipboardSource, SystemClipboard};
use crate::discovery::{HostDiscovery, Unavailable};
use crate::dispatch::{CommandSpec, Context, ParamType, Registry, command_usage, help_overview};
use crate::entry::Entry;
use crate::error::{NclipError, Result};
use crate::render::{self, DEFAULT_PREVIEW_CHARS};
use crate::store::{EntryStore, Source};
use crate::utils;

/// State shared by the built-in command handlers.
pub struct App<W: Write> {
    pub store: EntryStore,
    pub clipboard: Box<dyn ClipboardSource>,
    pub discovery: Box<dyn HostDiscovery>,
    pub out: W,
    pub preview_chars: usize,
    /// Cleared by `quit`; the interactive session stops once it is false.
    pub running: bool,
}

impl<W: Write> App<W> {
    pub fn new(store: EntryStore, out: W) -> Self {
        Self {
            store,
            clipboard: Box::new(SystemClipboard::default()),
            discovery: Box::new(Unavailable),
            out,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            running: true,
        }
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardSource + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_discovery(mut self, discovery: impl HostDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }
}

/// Registry with every built-in command.
pub fn registry<W: Write>() -> Registry<App<W>> {
    let mut registry = Registry::new();
    registry
        .register(
            "help",
            CommandSpec::new(help::<W>)
                .alias("h")
                .description(
                    "Displays a list of all commands or a single command if given as an argument",
                )
                .params([ParamType::String]),
        )
        .register(
            "quit",
            CommandSpec::new(quit::<W>)
                .alias("q")
                .description("Quits the application"),
        )
        .register(
            "add",
            CommandSpec::new(add::<W>)
                .alias("a")
                .description(
                    "Adds the arguments, or the system clipboard when none are given, as a text entry",
                )
                .params([ParamType::Array]),
        )
        .register(
            "add_dir",
            CommandSpec::new(add_dir::<W>)
                .alias("ad")
                .description("Copies the given directory into the clipboard history")
                .min_args(1)
                .params([ParamType::String]),
        )
        .register(
            "add_file",
            CommandSpec::new(add_file::<W>)
                .alias("af")
                .description("Copies the given file into the clipboard history")
                .min_args(1)
                .params([ParamType::String]),
        )
        .register(
            "view",
            CommandSpec::new(view::<W>)
                .alias("v")
                .description("Lists clipboard history entries, newest first")
                .params([ParamType::String]),
        )
        .register(
            "view_servers",
            CommandSpec::new(view_servers::<W>)
                .alias("vs")
                .description("Shows the clipboard servers found on the local network"),
        );
    registry
}

fn help<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    let single = ctx
        .str_arg(0)
        .and_then(|token| ctx.registry.find(token))
        .map(|(name, spec)| command_usage(name, spec));

    let text = single.unwrap_or_else(|| help_overview(ctx.registry));
    writeln!(ctx.state.out, "{text}")?;
    Ok(())
}

fn quit<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    ctx.state.running = false;
    Ok(())
}

fn add<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    let data = if ctx.args.is_empty() {
        match ctx.state.clipboard.read()? {
            Some(data) if !data.is_empty() => data,
            _ => {
                writeln!(ctx.state.out, "nothing added from clipboard")?;
                return Ok(());
            }
        }
    } else {
        ctx.args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
            .into_bytes()
    };

    let stored = ctx.state.store.save(Entry::text(), Source::Bytes(&data))?;
    writeln!(ctx.state.out, "added {} to the clipboard history", stored.id)?;
    Ok(())
}

fn add_file<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    let path = source_arg(ctx)?;
    let name = path.file_name().unwrap_or_default();
    let stored = ctx
        .state
        .store
        .save(Entry::file(name), Source::Path(&path))?;
    writeln!(ctx.state.out, "copied file {name} to the clipboard history ({})", stored.id)?;
    Ok(())
}

fn add_dir<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    let path = source_arg(ctx)?;
    let name = path.file_name().unwrap_or_default();
    let stored = ctx
        .state
        .store
        .save(Entry::directory(name), Source::Path(&path))?;
    writeln!(
        ctx.state.out,
        "copied directory {name} to the clipboard history ({})",
        stored.id
    )?;
    Ok(())
}

/// Expanded and, when it exists, canonical form of the path argument, so
/// `.` and `..` resolve to a real base name. Missing paths are returned as
/// given and rejected by the store.
fn source_arg<W: Write>(ctx: &Context<'_, App<W>>) -> Result<Utf8PathBuf> {
    let raw = ctx
        .str_arg(0)
        .ok_or_else(|| NclipError::Validation(format!("{} requires a path", ctx.name)))?;
    let path = utils::expand_path(raw)
        .map_err(|err| NclipError::Validation(format!("failed to expand {raw}: {err}")))?;

    match path.canonicalize_utf8() {
        Ok(resolved) => Ok(resolved),
        Err(err) => {
            debug!(path = %path, error = %err, "could not resolve source path");
            Ok(path)
        }
    }
}

fn view<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    if let Some(host) = ctx.str_arg(0) {
        debug!(host = %host, "remote view is not supported, listing local entries");
    }

    let entries = ctx.state.store.list()?;
    let listing = render::render_listing(&entries, ctx.state.preview_chars);
    ctx.state.out.write_all(listing.as_bytes())?;
    Ok(())
}

fn view_servers<W: Write>(ctx: &mut Context<'_, App<W>>) -> Result<()> {
    let hosts = ctx.state.discovery.hosts()?;
    if hosts.is_empty() {
        writeln!(ctx.state.out, "no servers found")?;
    }
    for host in hosts {
        writeln!(ctx.state.out, "{host}")?;
    }
    Ok(())
}
