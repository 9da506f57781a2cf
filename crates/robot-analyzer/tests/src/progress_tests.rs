use super::{items_message, percentage, prefixed_progress_title};

#[test]
fn progress_title_adds_prefix_when_missing() {
    assert_eq!(prefixed_progress_title("Indexing"), "robot-analyzer: Indexing".to_string());
}

#[test]
fn progress_title_preserves_existing_prefix() {
    assert_eq!(prefixed_progress_title("  robot-analyzer: Indexing "), "robot-analyzer: Indexing".to_string());
}

#[test]
fn percentage_is_clamped_and_handles_empty_totals() {
    assert_eq!(percentage(0, 40), 0);
    assert_eq!(percentage(10, 40), 25);
    assert_eq!(percentage(41, 40), 100);
    assert_eq!(percentage(0, 0), 100);
}

#[test]
fn items_message_counts_files() {
    assert_eq!(items_message(5, 12), "5 / 12 files");
}
