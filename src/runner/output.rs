use std::io::{self, BufRead};
use termcolor::{Color, ColorSpec, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Fail,
    Pass,
    Plain,
}

pub fn classify_line(line: &str) -> LineStatus {
    if line.contains("FAIL") {
        LineStatus::Fail
    } else if line.contains("PASS") {
        LineStatus::Pass
    } else {
        LineStatus::Plain
    }
}

pub fn write_line<W: WriteColor>(out: &mut W, line: &str) -> io::Result<()> {
    let color = match classify_line(line) {
        LineStatus::Fail => Some(Color::Red),
        LineStatus::Pass => Some(Color::Green),
        LineStatus::Plain => None,
    };

    if let Some(color) = color {
        out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(out, "{line}")?;
        out.reset()
    } else {
        writeln!(out, "{line}")
    }
}

/// Copies `reader` to `out` line by line, coloring result lines, and returns
/// the forwarded text. Bytes that are not UTF-8 are replaced rather than
/// ending the copy.
pub fn stream_colored<R: BufRead, W: WriteColor>(mut reader: R, out: &mut W) -> io::Result<String> {
    let mut forwarded = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);
        write_line(out, line)?;
        forwarded.push_str(line);
        forwarded.push('\n');
    }
    out.flush()?;
    Ok(forwarded)
}
