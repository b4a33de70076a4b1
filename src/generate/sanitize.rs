const ESC: u8 = 0x1b;
const CSI: u8 = 0x9b;

/// Strips terminal control sequences and stray control bytes from tool output.
///
/// Rules:
/// - ESC (0x1B) or the single-byte C1 CSI (0x9B) opens an escape sequence
/// - inside a sequence every byte is dropped up to and including the first
///   ASCII letter, which closes it
/// - outside a sequence, bytes below 0x20 are dropped except `\n` and `\t`;
///   every other byte is copied unchanged
///
/// An unterminated sequence swallows the rest of the input. The input is
/// treated as plain bytes: a 0x9B inside a UTF-8 character still opens a
/// sequence. Use [`clean`] for text already known to be UTF-8.
pub fn clean_bytes(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut in_escape = false;

    for &b in raw {
        if in_escape {
            if b.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }

        match b {
            ESC | CSI => in_escape = true,
            b'\n' | b'\t' => out.push(b),
            b if b < 0x20 => {}
            _ => out.push(b),
        }
    }

    out
}

/// Same rules as [`clean_bytes`], applied per char of decoded text.
///
/// The C1 introducer is the char U+009B, so UTF-8 characters whose encoding
/// contains a 0x9B byte (`Û`, `ě`, many CJK ideographs) are kept intact.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_escape = false;

    for ch in text.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }

        match ch {
            '\u{1b}' | '\u{9b}' => in_escape = true,
            '\n' | '\t' => out.push(ch),
            c if c < ' ' => {}
            _ => out.push(ch),
        }
    }

    out
}

/// Sanitize raw tool output into a string.
///
/// Valid UTF-8 goes through [`clean`]; anything else through [`clean_bytes`]
/// and is then decoded lossily.
pub fn clean_output(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => clean(text),
        Err(_) => String::from_utf8_lossy(&clean_bytes(raw)).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_ascii_passes_through() {
        let printable: String = (0x20u8..0x7f).map(char::from).collect();
        assert_eq!(clean(&printable), printable);
        assert_eq!(clean_bytes(printable.as_bytes()), printable.as_bytes());
        assert_eq!(clean("line one\n\tline two"), "line one\n\tline two");
    }

    #[test]
    fn strips_color_sequence() {
        assert_eq!(clean("A\x1B[31mB"), "AB");
        assert_eq!(clean_bytes(b"A\x1B[31mB"), b"AB");
        assert_eq!(clean("\x1B[1;32mok\x1B[0m"), "ok");
    }

    #[test]
    fn strips_cursor_movement_and_erase() {
        // Spinner frames the way a CLI redraws its progress line.
        let raw = "\x1B[?25l\x1B[2K\x1B[1GHello\x1B[K\x1B[?25h";
        assert_eq!(clean(raw), "Hello");
    }

    #[test]
    fn drops_control_bytes_but_keeps_newline_and_tab() {
        assert_eq!(clean("A\x07B\nC"), "AB\nC");
        assert_eq!(clean_bytes(b"A\x07B\nC"), b"AB\nC");
        assert_eq!(clean("a\r\nb\x08\tc\x00"), "a\nb\tc");
    }

    #[test]
    fn unterminated_sequence_consumes_rest() {
        assert_eq!(clean("A\x1B[31"), "A");
        assert_eq!(clean_bytes(b"A\x1B[31"), b"A");
        assert_eq!(clean("\x1B"), "");
    }

    #[test]
    fn every_0x9b_byte_opens_a_sequence() {
        assert_eq!(clean_bytes(b"A\x9b2KB"), b"AB");
        // The lead byte before it is an ordinary byte and is kept.
        assert_eq!(clean_bytes(b"\xc3\x9b[31mX"), b"\xc3X");
        assert_eq!(clean_bytes(b"a\xc2\x9b1mb"), b"a\xc2b");
        assert_eq!(clean_bytes(b"\xe6\x97\xa5"), b"\xe6\x97\xa5");
    }

    #[test]
    fn text_cleaning_keeps_utf8_characters() {
        assert_eq!(clean("Ûber café ✨ ěš"), "Ûber café ✨ ěš");
        assert_eq!(clean("A\u{9b}31mB"), "AB");
        assert_eq!(clean("\x1B[32m→ done\x1B[0m"), "→ done");
    }

    #[test]
    fn output_cleaning_picks_by_encoding() {
        assert_eq!(clean_output("\x1B[1mÛber\x1B[0m".as_bytes()), "Ûber");
        assert_eq!(clean_output(b"a\x9b1mb\xff"), "ab\u{fffd}");
    }

    #[test]
    fn idempotent() {
        let samples: [&[u8]; 7] = [
            b"A\x1B[31mB",
            b"A\x07B\nC",
            b"A\x1B[31",
            b"\xc3\x07\x9bx",
            b"\xc2\x07\x9b\x41tail",
            "Ûber\u{9b}1m✨".as_bytes(),
            b"plain\ttext\r\n",
        ];
        for raw in samples {
            let once = clean_bytes(raw);
            assert_eq!(clean_bytes(&once), once, "input {:?}", raw);
            let text = String::from_utf8_lossy(raw);
            assert_eq!(clean(&clean(&text)), clean(&text));
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(clean(""), "");
        assert!(clean_bytes(b"").is_empty());
    }
}
