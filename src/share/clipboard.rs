use super::ShareError;
use async_trait::async_trait;
use std::future::Future;

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Copy the text produced by `producer` to the clipboard.
///
/// The producer is a lazy future: nothing runs until this routine awaits
/// it, and the clipboard is only touched once a string is in hand. A
/// failing producer leaves the clipboard untouched and its error is
/// returned. On success the copied text is handed back.
pub async fn copy_text_to_clipboard<C, F>(clipboard: &C, producer: F) -> Result<String, ShareError>
where
    C: Clipboard + ?Sized,
    F: Future<Output = Result<String, ShareError>>,
{
    let text = producer.await?;
    clipboard.write_text(&text).await?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingClipboard {
        writes: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ShareError> {
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn writes_the_resolved_string() {
        let clipboard = RecordingClipboard::default();
        let copied = copy_text_to_clipboard(&clipboard, async { Ok("http://x/p/abc".to_string()) })
            .await
            .unwrap();
        assert_eq!(copied, "http://x/p/abc");
        assert_eq!(*clipboard.writes.borrow(), vec!["http://x/p/abc".to_string()]);
    }

    #[tokio::test]
    async fn producer_runs_only_when_awaited_by_the_copy() {
        let clipboard = RecordingClipboard::default();
        let started = Cell::new(false);
        let producer = async {
            started.set(true);
            Ok("late".to_string())
        };
        assert!(!started.get());
        copy_text_to_clipboard(&clipboard, producer).await.unwrap();
        assert!(started.get());
    }

    #[tokio::test]
    async fn failing_producer_never_touches_clipboard() {
        let clipboard = RecordingClipboard::default();
        let result = copy_text_to_clipboard(&clipboard, async {
            Err(ShareError::Request("offline".to_string()))
        })
        .await;
        assert_eq!(result, Err(ShareError::Request("offline".to_string())));
        assert!(clipboard.writes.borrow().is_empty());
    }
}
