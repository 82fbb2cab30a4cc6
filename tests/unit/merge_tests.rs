/*!
 * Line reconstruction tests: the dehyphenation contract.
 */

use vocap::ocr::{merge_lines, RecognizedLine};

fn lines(texts: &[&str]) -> Vec<RecognizedLine> {
    texts.iter().map(|text| RecognizedLine::new(*text)).collect()
}

#[test]
fn test_mergeLines_withNoTrailingHyphens_shouldReturnLinesJoinedUnchanged() {
    let input = lines(&[
        "The quiet afternoon settled over the garden.",
        "A small dog wandered between the flower beds,",
        "looking for something interesting.",
    ]);

    let merged = merge_lines(&input);
    assert_eq!(
        merged,
        "The quiet afternoon settled over the garden.\n\
         A small dog wandered between the flower beds,\n\
         looking for something interesting."
    );
}

#[test]
fn test_mergeLines_withSingleSplit_shouldAbsorbFirstTokenOfNextLine() {
    let input = lines(&["exam-", "ple is good"]);

    let merged = merge_lines(&input);
    assert_eq!(merged.lines().next().unwrap(), "example is good");
    // Nothing of line two is re-emitted as a standalone leading word
    assert!(!merged.contains("\nple"));
}

#[test]
fn test_mergeLines_withMultiHopSplit_shouldPropagateCarryAcrossTwoJoins() {
    let input = lines(&["a-", "b-", "c"]);
    assert_eq!(merge_lines(&input), "abc");
}

#[test]
fn test_mergeLines_withTrailingHyphenAndNoSuccessor_shouldLeaveHyphenInPlace() {
    let input = lines(&["the last word is bro-"]);
    assert_eq!(merge_lines(&input), "the last word is bro-");
}

#[test]
fn test_mergeLines_withMidWordHyphen_shouldNotTouchIt() {
    let input = lines(&["a well-known phrase", "on two lines"]);
    assert_eq!(merge_lines(&input), "a well-known phrase\non two lines");
}

#[test]
fn test_mergeLines_withSplitFollowedByNormalLines_shouldPreserveRemainingBreaks() {
    let input = lines(&[
        "reading in the after-",
        "noon is pleasant",
        "and quiet too",
    ]);

    assert_eq!(
        merge_lines(&input),
        "reading in the afternoon is pleasant\nand quiet too"
    );
}

#[test]
fn test_mergeLines_withEmptySequence_shouldReturnEmptyString() {
    assert_eq!(merge_lines(&[]), "");
}
