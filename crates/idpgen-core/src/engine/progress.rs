/// Progress events emitted by the build workflow.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named workflow phase began (pool query, building, serialization).
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A batch of conformer builds began.
    BatchStart { total_conformers: u64 },
    /// One conformer finished (successfully or not).
    ConformerDone,
    BatchFinish,

    /// Free-form status text for the user.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Optional callback sink for [`Progress`] events.
///
/// The default reporter discards everything, so library callers pay nothing
/// unless a front end installs a callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
