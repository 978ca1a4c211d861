use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

pub const MAX_FRAME_LEN: usize = 16384;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame longer than {0} bytes")]
    TooLong(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Line(String),
    InvalidUtf8(Vec<u8>),
}

#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    // Bytes of the frame being read, kept when a read is cancelled
    buf: Vec<u8>,
    max_len: usize,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    pub fn new(reader: R, max_len: usize) -> Self {
        FrameReader {
            reader,
            buf: Vec::new(),
            max_len,
        }
    }

    // Cancel safe, so it can be raced in `select!`
    pub async fn next_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        loop {
            let limit = (self.max_len + 1).saturating_sub(self.buf.len()) as u64;
            let read = (&mut self.reader)
                .take(limit)
                .read_until(b'\n', &mut self.buf)
                .await?;
            if self.buf.last() == Some(&b'\n') {
                return Ok(Some(self.take_frame()));
            }
            if self.buf.len() > self.max_len {
                return Err(FrameError::TooLong(self.max_len));
            }
            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                // Last frame without terminator
                return Ok(Some(self.take_frame()));
            }
        }
    }

    fn take_frame(&mut self) -> Frame {
        let mut bytes = std::mem::take(&mut self.buf);
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        match String::from_utf8(bytes) {
            Ok(line) => Frame::Line(line),
            Err(err) => Frame::InvalidUtf8(err.into_bytes()),
        }
    }
}
