//! File-backed logging, kept off the caller's thread.

use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::{mpsc, Mutex},
};

use chrono::Local;
use eyre::{eyre, Result, WrapErr};
use log::{Level, Metadata, Record};
use once_cell::sync::OnceCell;

/// A log record, flattened for the writer thread.
struct Message {
    module: String,
    level: Level,
    text: String,
    time: String,
}

impl Message {
    fn write_to_file(&self, file: &mut File) {
        let level_name = match self.level {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug | Level::Trace => "debug",
        };

        //      [date time] [module] [level] Text
        let _ = file.write_fmt(format_args!(
            "[{}] [{}] [{}] {}\n",
            self.time, self.module, level_name, self.text
        ));
    }
}

pub struct Logger;

impl log::Log for Logger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let module = match record.module_path() {
            Some(path) => path.split("::").last().unwrap_or("unknown").to_string(),
            None => return,
        };

        let message = Message {
            module,
            level: record.level(),
            text: format!("{}", record.args()),
            time: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        };

        if let Some(sender) = MSG_SENDER.get() {
            if let Ok(sender) = sender.lock() {
                let _ = sender.send(message);
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;
static MSG_SENDER: OnceCell<Mutex<mpsc::Sender<Message>>> = OnceCell::new();

/// Sets up the global logger, writing to the file at `log_path`.
///
/// Records are handed to a background thread for writing so that logging from
/// the game's update loop never waits on the filesystem. Also installs a panic
/// hook that logs the panic with a captured backtrace before the process dies.
pub fn init(log_path: &Path) -> Result<()> {
    let mut file = File::create(log_path)
        .wrap_err_with(|| format!("Unable to create log file {:?}", log_path))?;

    let (sender, receiver) = mpsc::channel();

    MSG_SENDER
        .set(Mutex::new(sender))
        .map_err(|_| eyre!("Logging was initialised twice"))?;

    log::set_logger(&LOGGER)
        .map(|_| log::set_max_level(log::LevelFilter::max()))
        .map_err(|err| eyre!("Unable to install logger: {}", err))?;

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("{}\n{}", info, backtrace);
    }));

    std::thread::spawn(move || {
        while let Ok(message) = receiver.recv() {
            message.write_to_file(&mut file);
        }
    });

    Ok(())
}
