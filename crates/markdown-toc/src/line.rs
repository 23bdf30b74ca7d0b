use std::io::{self, BufRead, Read};

/// Read every line from `reader`, dropping its terminator.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Input that is not valid
/// UTF-8 surfaces as `io::ErrorKind::InvalidData`.
pub fn read_lines<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    let mut lines = Vec::new();
    let mut rest = buffer.as_str();
    while !rest.is_empty() {
        match rest.find(|ch: char| ch == '\r' || ch == '\n') {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    Ok(lines)
}
