use tracing::debug;

/// Sequence number handed out by [`RequestSlice::start`]. Later starts get
/// larger numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Request lifecycle over a list of entities: `idle -> pending ->
/// (succeeded | failed)`, re-entering `pending` on every start.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSlice<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    latest: RequestSeq,
    resolved: bool,
}

impl<T> Default for RequestSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            latest: RequestSeq::default(),
            resolved: false,
        }
    }
}

impl<T> RequestSlice<T> {
    pub fn start(&mut self) -> RequestSeq {
        self.loading = true;
        self.error = None;
        self.resolved = false;
        self.latest = RequestSeq(self.latest.0 + 1);
        self.latest
    }

    pub fn success(&mut self, payload: Vec<T>) {
        self.loading = false;
        self.items = payload;
        self.error = None;
        self.resolved = true;
    }

    /// Items are left as they were so stale data stays visible.
    pub fn failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
        self.resolved = true;
    }

    /// Applies `success` only if `seq` belongs to the latest start.
    pub fn success_for(&mut self, seq: RequestSeq, payload: Vec<T>) -> bool {
        if !self.is_current(seq) {
            debug!(seq = seq.0, latest = self.latest.0, "dropping stale success");
            return false;
        }
        self.success(payload);
        true
    }

    /// Applies `failure` only if `seq` belongs to the latest start.
    pub fn failure_for(&mut self, seq: RequestSeq, message: impl Into<String>) -> bool {
        if !self.is_current(seq) {
            debug!(seq = seq.0, latest = self.latest.0, "dropping stale failure");
            return false;
        }
        self.failure(message);
        true
    }

    pub fn set_selected(&mut self, item: T) {
        self.selected = Some(item);
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        seq == self.latest
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest
    }

    pub fn status(&self) -> RequestStatus {
        if self.loading {
            RequestStatus::Pending
        } else if self.error.is_some() {
            RequestStatus::Failed
        } else if self.resolved {
            RequestStatus::Succeeded
        } else {
            RequestStatus::Idle
        }
    }
}
