//! Entry scheduler
//!
//! Entries are presented strictly one after another: entry N+1's wait for
//! its start begins only after entry N's window has been waited out, even
//! when N finished rendering early. A start that has already passed is not
//! an error; the entry is rendered immediately.

use std::io::Write;

use rand::Rng;

use super::callout::show_code;
use super::cancel::CancellationToken;
use super::typing::TypingRenderer;
use super::PlaybackResult;
use crate::terminal::Screen;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::time::{poll_step, Clock};

/// Clock readings taken while presenting one entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryTiming {
    /// Position in the transcript
    pub index: usize,
    /// Elapsed time when rendering began
    pub started_at: f64,
    /// Elapsed time when text and code were fully rendered
    pub rendered_at: f64,
    /// Elapsed time when the wait for the entry's end returned. Normally at
    /// or past the end of its window; earlier if the run was cancelled
    /// during that wait.
    pub finished_at: f64,
}

/// Outcome of a scheduler run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackReport {
    /// One record per entry that began rendering, in order
    pub entries: Vec<EntryTiming>,
    /// Whether the run stopped on the cancellation flag
    pub cancelled: bool,
}

impl PlaybackReport {
    /// Number of entries that began rendering
    pub fn presented(&self) -> usize {
        self.entries.len()
    }
}

/// Drives transcript entries against a clock
pub struct EntryScheduler<C: Clock, W: Write, R: Rng> {
    clock: C,
    screen: Screen<W>,
    typist: TypingRenderer<R>,
    cancel: CancellationToken,
}

impl<C: Clock, W: Write, R: Rng> EntryScheduler<C, W, R> {
    pub fn new(clock: C, screen: Screen<W>, rng: R, cancel: CancellationToken) -> Self {
        Self {
            clock,
            screen,
            typist: TypingRenderer::new(rng),
            cancel,
        }
    }

    pub fn into_screen(self) -> Screen<W> {
        self.screen
    }

    /// Present every entry in order, then raise the cancellation flag.
    ///
    /// The flag is checked before each entry, while waiting, and again once
    /// an entry's start is reached; an entry is never begun after it has
    /// been observed. The flag is raised on every exit path so observers
    /// learn that playback ended.
    pub fn run(&mut self, transcript: &Transcript) -> PlaybackResult<PlaybackReport> {
        let mut report = PlaybackReport::default();
        let result = self.present_all(transcript, &mut report);
        self.cancel.cancel();

        match &result {
            Ok(()) if report.cancelled => {
                tracing::info!(
                    "Playback cancelled after {} of {} entries",
                    report.presented(),
                    transcript.len()
                );
            }
            Ok(()) => tracing::debug!("Presented all {} entries", report.presented()),
            Err(e) => tracing::error!("Playback stopped: {}", e),
        }

        result.map(|()| report)
    }

    fn present_all(
        &mut self,
        transcript: &Transcript,
        report: &mut PlaybackReport,
    ) -> PlaybackResult<()> {
        self.screen.clear()?;

        for (index, entry) in transcript.iter().enumerate() {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            self.wait_until(entry.start);
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let started_at = self.clock.elapsed();
            self.present(entry)?;
            let rendered_at = self.clock.elapsed();

            self.wait_until(entry.end);
            report.entries.push(EntryTiming {
                index,
                started_at,
                rendered_at,
                finished_at: self.clock.elapsed(),
            });
        }

        Ok(())
    }

    fn present(&mut self, entry: &TranscriptEntry) -> PlaybackResult<()> {
        let time_of_day = chrono::Local::now().format("%H:%M:%S").to_string();
        let style = self.screen.style_for(&entry.speaker);

        self.screen.prompt(&entry.speaker, &time_of_day)?;
        tracing::info!("[{}] {}: {}", time_of_day, entry.speaker, entry.text);

        self.typist.type_text(
            &self.clock,
            &mut self.screen,
            &entry.text,
            style,
            entry.duration(),
        )?;
        self.screen.end_dialogue()?;

        if entry.has_code() {
            show_code(&self.clock, &mut self.screen, &entry.code)?;
        }

        Ok(())
    }

    /// Sleep-and-recheck until `target` seconds have elapsed or the flag is
    /// raised.
    fn wait_until(&self, target: f64) {
        loop {
            if self.cancel.is_cancelled() {
                return;
            }
            let remaining = target - self.clock.elapsed();
            if remaining.is_nan() || remaining <= 0.0 {
                return;
            }
            self.clock.sleep(poll_step(remaining));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{Palette, PromptConfig, SpeakerStyle};
    use crate::time::ManualClock;
    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::sync::Arc;

    fn scheduler(
        clock: &ManualClock,
        cancel: CancellationToken,
    ) -> EntryScheduler<&ManualClock, Vec<u8>, StdRng> {
        let screen = Screen::new(Vec::new(), Palette::default(), PromptConfig::default())
            .with_large_font(false);
        EntryScheduler::new(clock, screen, StdRng::seed_from_u64(42), cancel)
    }

    fn typed(ch: char, style: SpeakerStyle) -> Vec<u8> {
        let mut sample = Screen::new(Vec::new(), Palette::default(), PromptConfig::default())
            .with_large_font(false);
        sample.type_char(ch, style).unwrap();
        sample.into_inner()
    }

    /// Log sink shared between a test and its subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    /// Raises the flag once virtual time reaches `at`
    struct CancelAt {
        clock: ManualClock,
        at: f64,
        cancel: CancellationToken,
    }

    impl Clock for CancelAt {
        fn elapsed(&self) -> f64 {
            self.clock.elapsed()
        }

        fn sleep(&self, duration: std::time::Duration) {
            self.clock.sleep(duration);
            if self.clock.elapsed() >= self.at {
                self.cancel.cancel();
            }
        }
    }

    fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        position(haystack, needle).is_some()
    }

    #[test]
    fn test_single_entry_idles_until_end() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![TranscriptEntry::new(0.0, 2.0, "ArgoCD", "hi")].into();

        let report = scheduler.run(&transcript).unwrap();

        assert_eq!(report.presented(), 1);
        let timing = report.entries[0];
        assert_eq!(timing.started_at, 0.0);
        assert!(timing.rendered_at < 0.5);
        assert!(timing.finished_at >= 2.0);
        assert!(clock.elapsed() >= 2.0);

        let out = scheduler.into_screen().into_inner();
        let argo = Palette::default().style_for("ArgoCD");
        assert!(contains(&out, &typed('h', argo)));
        assert!(contains(&out, &typed('i', argo)));
    }

    #[test]
    fn test_waits_for_start() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![TranscriptEntry::new(3.25, 4.0, "A", "later")].into();

        let report = scheduler.run(&transcript).unwrap();

        let started = report.entries[0].started_at;
        assert!(started >= 3.25);
        assert!(started < 3.25 + 0.011);
    }

    #[test]
    fn test_code_entry_pauses_after_text() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript =
            vec![TranscriptEntry::new(0.0, 3.0, "Teleport", "run it").with_code("echo ok")].into();

        let report = scheduler.run(&transcript).unwrap();

        let timing = report.entries[0];
        assert!(timing.rendered_at - timing.started_at >= 1.0);
        assert!(timing.finished_at >= 3.0);

        let out = scheduler.into_screen().into_inner();
        let teleport = Palette::default().style_for("Teleport");
        let last_char = position(&out, &typed('t', teleport)).unwrap();
        let snippet = position(&out, b"Code Snippet:").unwrap();
        assert!(last_char < snippet);
        assert!(contains(&out, b"echo ok"));
    }

    #[test]
    fn test_overrun_code_is_absorbed() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![
            TranscriptEntry::new(0.0, 0.5, "A", "quick").with_code("make"),
            TranscriptEntry::new(0.6, 1.0, "B", "next"),
        ]
        .into();

        let report = scheduler.run(&transcript).unwrap();

        assert!(report.entries[0].finished_at >= 1.0);
        assert_eq!(report.entries[1].started_at, report.entries[0].finished_at);
    }

    #[test]
    fn test_entries_are_serialized() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![
            TranscriptEntry::new(0.0, 2.0, "A", "first"),
            TranscriptEntry::new(1.0, 3.0, "B", "overlapping"),
        ]
        .into();

        let report = scheduler.run(&transcript).unwrap();

        assert!(report.entries[0].finished_at >= 2.0);
        assert!(report.entries[1].started_at >= report.entries[0].finished_at);
    }

    #[test]
    fn test_reversed_window_renders_without_pacing() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![TranscriptEntry::new(2.0, 1.0, "A", "backwards")].into();

        let report = scheduler.run(&transcript).unwrap();

        let timing = report.entries[0];
        assert_eq!(timing.started_at, timing.rendered_at);
        assert_eq!(timing.rendered_at, timing.finished_at);
    }

    #[test]
    fn test_unknown_speaker_uses_default_style() {
        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![TranscriptEntry::new(0.0, 1.0, "Zephyr", "z")].into();

        scheduler.run(&transcript).unwrap();

        let out = scheduler.into_screen().into_inner();
        assert!(contains(&out, &typed('z', SpeakerStyle::default())));
    }

    #[test]
    fn test_run_raises_flag_on_completion() {
        let clock = ManualClock::new();
        let cancel = CancellationToken::new();
        let mut scheduler = scheduler(&clock, cancel.clone());

        let report = scheduler.run(&Transcript::new()).unwrap();

        assert!(!report.cancelled);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_cancelled_before_start_presents_nothing() {
        let clock = ManualClock::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut scheduler = scheduler(&clock, cancel);
        let transcript: Transcript = vec![TranscriptEntry::new(5.0, 6.0, "A", "never")].into();

        let report = scheduler.run(&transcript).unwrap();

        assert!(report.cancelled);
        assert_eq!(report.presented(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        let out = String::from_utf8(scheduler.into_screen().into_inner()).unwrap();
        assert!(!out.contains("never"));
    }

    #[test]
    fn test_each_entry_is_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let clock = ManualClock::new();
        let mut scheduler = scheduler(&clock, CancellationToken::new());
        let transcript: Transcript = vec![TranscriptEntry::new(0.0, 2.0, "ArgoCD", "hi")].into();

        tracing::subscriber::with_default(subscriber, || {
            scheduler.run(&transcript).unwrap();
        });

        let logged = logs.contents();
        assert!(logged.contains("INFO"), "{logged}");
        assert!(logged.contains("] ArgoCD: hi"), "{logged}");
    }

    #[test]
    fn test_cancel_during_wait_for_end_cuts_window_short() {
        let cancel = CancellationToken::new();
        let clock = CancelAt {
            clock: ManualClock::new(),
            at: 1.0,
            cancel: cancel.clone(),
        };
        let screen = Screen::new(Vec::new(), Palette::default(), PromptConfig::default())
            .with_large_font(false);
        let mut scheduler =
            EntryScheduler::new(&clock, screen, StdRng::seed_from_u64(42), cancel.clone());
        let transcript: Transcript = vec![
            TranscriptEntry::new(0.0, 10.0, "ArgoCD", "hi"),
            TranscriptEntry::new(10.0, 11.0, "Teleport", "too late"),
        ]
        .into();

        let report = scheduler.run(&transcript).unwrap();

        assert!(report.cancelled);
        assert_eq!(report.presented(), 1);
        let finished = report.entries[0].finished_at;
        assert!(finished >= 1.0);
        assert!(finished < 1.0 + 0.011);
        let out = String::from_utf8(scheduler.into_screen().into_inner()).unwrap();
        assert!(!out.contains("Teleport"));
    }
}
