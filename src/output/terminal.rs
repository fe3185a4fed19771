//! Terminal colors
//!
//! 256-color palette. A [`Painter`] built with colors disabled returns its
//! input untouched, so callers never branch on terminal support.

use crate::mock::LatencyClass;
use crate::schema::HttpMethod;

pub mod colors {
    pub const GREY: u8 = 102;   // secondary text
    pub const AQUA: u8 = 109;   // numbers, info
    pub const ORANGE: u8 = 208; // warnings, PUT/PATCH
    pub const RED: u8 = 167;    // errors, DELETE
    pub const BLUE: u8 = 68;    // labels
    pub const GREEN: u8 = 71;   // success, GET
    pub const YELLOW: u8 = 185; // POST, moderate latency
}

pub const RESET: &str = "\x1b[0m";

#[inline]
pub fn fg(color: u8) -> String {
    format!("\x1b[38;5;{}m", color)
}

#[inline]
pub fn bold_fg(color: u8) -> String {
    format!("\x1b[1;38;5;{}m", color)
}

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, text: &str, color: u8, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let code = if bold { bold_fg(color) } else { fg(color) };
        format!("{}{}{}", code, text, RESET)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, colors::GREEN, true)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, colors::RED, true)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, colors::ORANGE, true)
    }

    pub fn label(&self, text: &str) -> String {
        self.paint(text, colors::BLUE, true)
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(text, colors::AQUA, false)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, colors::GREY, false)
    }

    pub fn method(&self, method: HttpMethod) -> String {
        let color = match method {
            HttpMethod::Get => colors::GREEN,
            HttpMethod::Post => colors::YELLOW,
            HttpMethod::Put | HttpMethod::Patch => colors::ORANGE,
            HttpMethod::Delete => colors::RED,
        };
        self.paint(method.as_str(), color, true)
    }

    /// "200 OK", "404 Error", "503 Server Error"
    pub fn status(&self, code: u16) -> String {
        let (color, suffix) = match code / 100 {
            2 => (colors::GREEN, " OK"),
            4 => (colors::RED, " Error"),
            5 => (colors::RED, " Server Error"),
            _ => (colors::GREY, ""),
        };
        self.paint(&format!("{}{}", code, suffix), color, true)
    }

    pub fn latency(&self, time_ms: u64) -> String {
        let color = match LatencyClass::of(time_ms) {
            LatencyClass::Fast => colors::GREEN,
            LatencyClass::Moderate => colors::YELLOW,
            LatencyClass::Slow => colors::RED,
        };
        self.paint(&format!("{}ms", time_ms), color, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_fg_color() {
        assert_eq!(bold_fg(71), "\x1b[1;38;5;71m");
    }

    #[test]
    fn test_disabled_painter_is_plain() {
        let painter = Painter::new(false);
        assert_eq!(painter.status(200), "200 OK");
        assert_eq!(painter.status(404), "404 Error");
        assert_eq!(painter.status(503), "503 Server Error");
        assert_eq!(painter.method(HttpMethod::Delete), "DELETE");
        assert_eq!(painter.latency(150), "150ms");
    }

    #[test]
    fn test_enabled_painter_colors() {
        let painter = Painter::new(true);
        assert!(painter.success("OK").contains("1;38;5;71m"));
        assert!(painter.error("FAIL").contains("1;38;5;167m"));
        assert!(painter.latency(350).contains("38;5;185m"));
        assert!(painter.latency(650).ends_with(RESET));
    }
}
