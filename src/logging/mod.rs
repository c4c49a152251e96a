use std::{
    fmt::Write as _,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    thread,
};

use chrono::{format::DelayedFormat, DateTime, Local, NaiveDate};
use crossbeam_channel::{unbounded, Receiver, Sender};
use once_cell::sync::Lazy;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

/// 單行累積超過此長度就先寫入檔案
const FLUSH_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "Info",
            Level::Warn => "Warn",
            Level::Error => "Error",
            Level::Debug => "Debug",
        }
    }
}

pub struct LogMessage {
    pub level: Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }
}

/// 非同步寫檔的 logger，訊息經由 channel 交給背景線程批次寫入。
pub struct Logger {
    writer: Sender<LogMessage>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        let (tx, rx) = unbounded::<LogMessage>();
        let name = log_name.to_string();

        //寫入檔案的操作使用另一個線程處理
        thread::spawn(move || Self::run(name, rx));

        Logger { writer: tx }
    }

    pub fn info<S: Into<String>>(&self, log: S) {
        self.send(Level::Info, log.into());
    }

    pub fn warn<S: Into<String>>(&self, log: S) {
        self.send(Level::Warn, log.into());
    }

    pub fn error<S: Into<String>>(&self, log: S) {
        self.send(Level::Error, log.into());
    }

    pub fn debug<S: Into<String>>(&self, log: S) {
        self.send(Level::Debug, log.into());
    }

    fn send(&self, level: Level, msg: String) {
        if let Err(why) = self.writer.send(LogMessage::new(level, msg)) {
            error_console(why.to_string());
        }
    }

    fn run(name: String, rx: Receiver<LogMessage>) {
        let mut day: Option<NaiveDate> = None;
        let mut writer: Option<BufWriter<File>> = None;
        let mut line = String::with_capacity(FLUSH_THRESHOLD);

        while let Ok(received) = rx.recv() {
            // 日期變更時換檔
            let today = received.created_at.date_naive();
            if day != Some(today) {
                if let Some(mut w) = writer.take() {
                    if !line.is_empty() {
                        let _ = w.write_all(line.as_bytes());
                        line.clear();
                    }
                    let _ = w.flush();
                }

                writer = match Self::open(&name, received.created_at) {
                    Ok(w) => Some(w),
                    Err(why) => {
                        error_console(format!("Failed to open log file because {:?}", why));
                        None
                    }
                };
                day = Some(today);
            }

            if writeln!(
                &mut line,
                "{} {} {}",
                received.created_at.format("%F %X%.6f"),
                received.level.as_str(),
                received.msg
            )
            .is_err()
            {
                continue;
            }

            if rx.is_empty() || line.len() >= FLUSH_THRESHOLD {
                match writer.as_mut() {
                    Some(w) => {
                        if w.write_all(line.as_bytes()).is_err() || w.flush().is_err() {
                            info_console(line.clone());
                        }
                    }
                    None => info_console(line.clone()),
                }

                line.clear();
            }
        }
    }

    fn open(name: &str, now: DateTime<Local>) -> std::io::Result<BufWriter<File>> {
        let log_path = Self::get_log_path(name, now)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(BufWriter::with_capacity(FLUSH_THRESHOLD, file))
    }

    fn get_log_path(name: &str, now: DateTime<Local>) -> std::io::Result<PathBuf> {
        let path = Path::new("log");

        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let mut log_path = PathBuf::from(path);
        log_path.push(format!("{}_{}.log", now.format("%Y-%m-%d"), name));

        Ok(log_path)
    }
}

pub fn info_file_async<S: Into<String>>(log: S) {
    LOGGER.info(log);
}

pub fn warn_file_async<S: Into<String>>(log: S) {
    LOGGER.warn(log);
}

pub fn error_file_async<S: Into<String>>(log: S) {
    LOGGER.error(log);
}

pub fn debug_file_async<S: Into<String>>(log: S) {
    LOGGER.debug(log);
}

pub fn info_console<S: Into<String>>(log: S) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log.into()
    );
}

pub fn error_console<S: Into<String>>(log: S) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log.into()
    );
}
