#![allow(unused)]

/// Paint text when stdout is a terminal, leave it plain otherwise
macro_rules! colorize_impl {
    ($color_expr:expr, $($arg:tt)*) => {
        {
            use atty::Stream;
            if atty::is(Stream::Stdout) {
                format!("{}", $color_expr.paint(format!($($arg)*)))
            } else {
                format!($($arg)*)
            }
        }
    }
}

#[macro_export]
macro_rules! green {
    ($($arg:tt)*) => {
        colorize_impl!(ansi_term::Colour::Green.bold(), $($arg)*)
    }
}

#[macro_export]
macro_rules! red {
    ($($arg:tt)*) => {
        colorize_impl!(ansi_term::Colour::Red.bold(), $($arg)*)
    }
}

#[macro_export]
macro_rules! yellow {
    ($($arg:tt)*) => {
        colorize_impl!(ansi_term::Colour::Yellow.bold(), $($arg)*)
    }
}

#[macro_export]
macro_rules! bold {
    ($($arg:tt)*) => {
        colorize_impl!(ansi_term::Style::new().bold(), $($arg)*)
    }
}

#[macro_export]
macro_rules! dimmed {
    ($($arg:tt)*) => {
        colorize_impl!(ansi_term::Colour::Fixed(244), $($arg)*)
    }
}

#[macro_export]
macro_rules! pluralize {
    ($value:expr, $word:expr) => {
        if $value == 1 {
            format!("{} {}", $value, $word)
        } else {
            format!("{} {}s", $value, $word)
        }
    };
}
