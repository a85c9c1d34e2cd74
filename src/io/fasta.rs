use anyhow::Result;
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    /// Header text after '>', trailing whitespace removed.
    pub header: String,
    /// Concatenated, uppercased sequence lines.
    pub seq: Vec<u8>,
}

/// Stands in for one non-ASCII character of a sequence line, so that every
/// character keeps exactly one position.
pub const NON_ASCII_BASE: u8 = b'?';

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
    peek_header: Option<String>,
    orphan_lines: usize,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            done: false,
            peek_header: None,
            orphan_lines: 0,
        }
    }

    /// Non-empty lines seen before the first header. They belong to no
    /// record and are dropped.
    pub fn orphan_lines(&self) -> usize {
        self.orphan_lines
    }

    /// 读取一行；非法 UTF-8 按 U+FFFD 解码，不中断解析。
    fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                let Some(line) = self.read_line()? else {
                    self.done = true;
                    return Ok(None);
                };
                if let Some(h) = line.strip_prefix('>') {
                    break h.trim_end().to_string();
                }
                if !line.trim().is_empty() {
                    self.orphan_lines += 1;
                }
            }
        };

        // Read sequence lines; the last record is flushed on EOF
        let mut seq: Vec<u8> = Vec::new();
        loop {
            let Some(line) = self.read_line()? else {
                self.done = true;
                break;
            };
            if let Some(h) = line.strip_prefix('>') {
                self.peek_header = Some(h.trim_end().to_string());
                break;
            }
            seq.extend(line.trim_end().chars().map(|c| {
                if c.is_ascii() {
                    (c as u8).to_ascii_uppercase()
                } else {
                    NON_ASCII_BASE
                }
            }));
        }

        Ok(Some(FastaRecord { header, seq }))
    }
}
