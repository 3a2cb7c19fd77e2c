//! oxline entrypoint: a line-at-a-time REPL over the editor core.
mod session;

use anyhow::Result;
use clap::Parser;
use core_actions::{LineEditor, RenderEffects};
use core_config::load_from;
use core_events::{EVENT_CHANNEL_CAP, Event, InputEvent};
use core_history::HistoryItem;
use core_model::EditorModel;
use core_render::{CellFlags, Composed, Frame, Writer, compose};
use core_terminal::{CrosstermBackend, TerminalCapabilities, TerminalGuard};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use session::{LineOutcome, Session, model_options};
use std::fmt;
use std::io::{BufRead, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxline", version, about = "Interactive line editor with completion and history search")]
struct Args {
    /// Optional configuration file path (overrides discovery of `oxline.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Directory recorded with each history entry (defaults to the process cwd).
    #[arg(long = "cwd")]
    pub cwd: Option<String>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct Bootstrap {
    model: EditorModel,
    session: Session,
    caps: TerminalCapabilities,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run(&mut self) -> Result<Bootstrap> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let args = Args::parse();
        let config = load_from(args.config.clone())?;
        let session = Session::new(&config.file.completion);
        let registered = session.register_specs(&config.file.completion.specs);

        let caps = TerminalCapabilities::detect();
        let mut model = EditorModel::new(model_options(&config.file));
        model.resize(caps.size.0, caps.size.1);
        let cwd = match args.cwd {
            Some(dir) => dir,
            None => std::env::current_dir()?.to_string_lossy().into_owned(),
        };
        model.set_current_directory(cwd);

        info!(
            target: "runtime",
            interactive = caps.interactive,
            cols = caps.size.0,
            rows = caps.size.1,
            config_override = args.config.is_some(),
            specs = registered,
            "bootstrap_complete"
        );
        Ok(Bootstrap {
            model,
            session,
            caps,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("oxline.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "oxline.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Exit,
    EndOfInput,
    ShutdownEvent,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Exit => "exit",
            ShutdownReason::EndOfInput => "end_of_input",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum LoopControl {
    Continue,
    Break(ShutdownReason),
}

/// Raw mode turns off output post-processing, so bare `\n` would not return
/// the carriage.
fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

struct LineRuntime<'a> {
    editor: LineEditor,
    session: Session,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    out: Stdout,
    _terminal_guard: TerminalGuard<'a>,
}

impl<'a> LineRuntime<'a> {
    fn new(
        bootstrap: Bootstrap,
        terminal_guard: TerminalGuard<'a>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        input_task: tokio::task::JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
    ) -> Self {
        let Bootstrap { model, session, .. } = bootstrap;
        let source = session.completion_source();
        Self {
            editor: LineEditor::new(model, source),
            session,
            rx,
            tx: Some(tx),
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            out: std::io::stdout(),
            _terminal_guard: terminal_guard,
        }
    }

    async fn run(&mut self) -> Result<()> {
        self.repaint()?;

        let loop_span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter_loop = loop_span.enter();

        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            let control = match event {
                Event::Input(input) => self.handle_input_event(input)?,
                Event::RenderRequested => {
                    self.repaint()?;
                    LoopControl::Continue
                }
                Event::Shutdown => LoopControl::Break(ShutdownReason::ShutdownEvent),
            };
            if let LoopControl::Break(reason) = control {
                shutdown_reason = reason;
                break;
            }
        }

        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(())
    }

    fn handle_input_event(&mut self, input: InputEvent) -> Result<LoopControl> {
        let draft = self.editor.model().buffer.value();
        let effects = self.editor.apply_event(input);
        self.apply_effects(effects, &draft)
    }

    fn apply_effects(&mut self, effects: RenderEffects, draft: &str) -> Result<LoopControl> {
        if effects.eof {
            self.finish_line("")?;
            return Ok(LoopControl::Break(ShutdownReason::EndOfInput));
        }
        if effects.interrupted {
            self.finish_line(&format!("{draft}^C"))?;
        }
        if let Some(line) = effects.submitted {
            self.finish_line(&line)?;
            match self.session.execute(&line, self.editor.model().history()) {
                LineOutcome::Exit => return Ok(LoopControl::Break(ShutdownReason::Exit)),
                LineOutcome::Output(text) => {
                    queue!(self.out, Print(to_crlf(&text)))?;
                }
            }
            if !line.trim().is_empty() {
                let model = self.editor.model_mut();
                let item = HistoryItem::new(line, model.current_directory());
                model.push_history(item);
            }
        }
        if effects.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        if effects.dirty {
            self.repaint()?;
        }
        Ok(LoopControl::Continue)
    }

    fn repaint(&mut self) -> Result<()> {
        let composed = compose(self.editor.model());
        let mut writer = Writer::new();
        writer.paint(&composed);
        writer.flush_to(&mut self.out)
    }

    /// Leave `text` on the prompt row, drop any box below it and move to a
    /// fresh row.
    fn finish_line(&mut self, text: &str) -> Result<()> {
        let model = self.editor.model();
        let mut frame = Frame::new(model.layout().cols(), 1);
        let x = frame.put_str(0, 0, model.prompt(), CellFlags::empty());
        frame.put_str(x, 0, text, CellFlags::empty());
        let mut writer = Writer::new();
        writer.finish_line(&Composed {
            frame,
            cursor: (0, 0),
        });
        writer.flush_to(&mut self.out)
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        info!(target: "runtime.shutdown", reason = reason.as_str(), stage = "begin", "shutdown_stage");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "input_task_shutdown_signal");
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(target: "runtime.shutdown", "input_task_joined"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "input_task_cancelled")
                }
                Ok(Err(err)) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
                Err(_) => warn!(target: "runtime.shutdown", "input_task_timeout"),
            }
        }

        info!(target: "runtime.shutdown", reason = reason.as_str(), stage = "complete", "shutdown_stage");
    }
}

/// Non-terminal stdin: no raw mode, no painting; each line runs as if
/// submitted.
fn run_plain(bootstrap: Bootstrap) -> Result<()> {
    let Bootstrap {
        mut model, session, ..
    } = bootstrap;
    info!(target: "runtime", "plain_mode");
    let mut out = std::io::stdout().lock();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match session.execute(&line, model.history()) {
            LineOutcome::Exit => break,
            LineOutcome::Output(text) => out.write_all(text.as_bytes())?,
        }
        if !line.trim().is_empty() {
            let item = HistoryItem::new(line, model.current_directory());
            model.push_history(item);
        }
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    let bootstrap = startup.run()?;
    if !bootstrap.caps.interactive {
        return run_plain(bootstrap);
    }

    let guard = startup.backend.enter_guard()?;
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut runtime = LineRuntime::new(bootstrap, guard, tx, rx, input_task, input_shutdown);
    runtime.run().await
}
