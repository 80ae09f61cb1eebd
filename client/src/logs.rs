use std::{
    fmt::Display,
    sync::atomic::{
        AtomicBool,
        Ordering,
    },
};

use colored::{
    Color,
    Colorize,
};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences info, success, and key/value output. Warnings and errors are always printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Message {
    Info,
    Success,
    Warning,
    Error,
}

fn log(msg_ty: Message, label: impl Display, msg: impl Display) {
    let line = format!(
        "[{}] {} {}",
        msg_ty.to_string().color(msg_ty.get_color()),
        label.to_string().color(LogColor::Debug),
        msg.to_string().bright_black()
    );
    match msg_ty {
        Message::Warning | Message::Error => eprintln!("{line}"),
        Message::Info | Message::Success if !is_quiet() => println!("{line}"),
        _ => (),
    }
}

impl Message {
    fn get_color(&self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }
}

#[allow(dead_code)]
#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Debug,
    Error,
    Warning,
    Header,
    Info,
    Gray,
}

/// Formats `key: value` with the key colorized, [`LogColor::Debug`] by default.
#[macro_export]
macro_rules! fmt_kv {
    ($key:expr, $value:expr) => {
        $crate::fmt_kv!($key, $value, $crate::LogColor::Debug)
    };
    ($key:expr, $value:expr, $color:expr) => {{
        use ::colored::Colorize;
        format!("{}: {}", $key.to_string().color($color), $value)
    }};
}

/// Prints a [`fmt_kv!`] line unless output is quiet.
#[macro_export]
macro_rules! print_kv {
    ($key:expr, $value:expr $(, $color:expr)?) => {
        if !$crate::logs::is_quiet() {
            println!("{}", $crate::fmt_kv!($key, $value $(, $color)?));
        }
    };
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { log(Message::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { log(Message::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { log(Message::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { log(Message::Error, label, msg) }
    pub fn log_divider() { if !is_quiet() { println!("--------------------------------------------------------------------------------"); } }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight  => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Debug      => Color::TrueColor { r: 40, g: 100,  b: 153 },
                LogColor::Error      => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning    => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Header     => Color::TrueColor { r: 0,   g: 255, b: 0   },
                LogColor::Info       => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray       => Color::TrueColor { r: 192, g: 192, b: 192 },
            }
        }
    }
}

pub use unformatted::*;
