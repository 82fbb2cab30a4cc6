/*!
 * Line reconstruction for OCR output.
 *
 * OCR engines transcribe one physical line at a time. A word wrapped across
 * a line break with a trailing hyphen would otherwise survive as two broken
 * tokens ("exam-" / "ple"), so merging splices such words back together
 * while preserving the line breaks of everything else.
 */

use super::RecognizedLine;

/// Merge hyphenated line-break artifacts in an ordered line sequence.
///
/// Single left-to-right pass. When a line ends with a hyphen, the hyphen is
/// stripped from its last word and the following line is spliced onto the
/// same output line: its first word completes the split word, the remainder
/// follows. Splicing repeats while the rejoined word still ends with a
/// hyphen, so a word split across three lines comes back whole. A hyphen on
/// the final line has no lookahead target and stays in place.
///
/// Untouched lines are emitted verbatim; all lines are joined with `\n`.
pub fn merge_lines(lines: &[RecognizedLine]) -> String {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        let line = &lines[index];
        index += 1;

        if !line.ends_with_hyphen || index >= lines.len() {
            merged.push(line.text.clone());
            continue;
        }

        let mut tokens: Vec<String> = line.text.split_whitespace().map(String::from).collect();

        while tokens.last().is_some_and(|word| word.ends_with('-')) && index < lines.len() {
            let mut continuation: Vec<String> = lines[index]
                .text
                .split_whitespace()
                .map(String::from)
                .collect();
            index += 1;

            if continuation.is_empty() {
                continue;
            }
            let first_word = continuation.remove(0);

            let mut rejoined = tokens.pop().unwrap_or_default();
            rejoined.pop();
            rejoined.push_str(&first_word);
            tokens.push(rejoined);
            tokens.extend(continuation);
        }

        merged.push(tokens.join(" "));
    }

    merged.join("\n")
}
