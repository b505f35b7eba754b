use crate::error::TabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSubscription(usize);

type TabListener = Box<dyn FnMut(usize, usize)>;

/// Tracks which editor panel is mounted. Owns no editing state.
pub struct TabShell {
    labels: Vec<String>,
    active: usize,
    listeners: Vec<(TabSubscription, TabListener)>,
    next_subscription: usize,
}

impl TabShell {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            active: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_label(&self) -> Option<&str> {
        self.labels.get(self.active).map(String::as_str)
    }

    /// Switches panels. Returns whether the active index changed; listeners
    /// are only told about real changes.
    pub fn select(&mut self, index: usize) -> Result<bool, TabError> {
        if index >= self.labels.len() {
            return Err(TabError::OutOfRange {
                index,
                len: self.labels.len(),
            });
        }
        if index == self.active {
            return Ok(false);
        }

        let previous = std::mem::replace(&mut self.active, index);
        for (_, listener) in &mut self.listeners {
            listener(previous, index);
        }
        Ok(true)
    }

    /// Listener receives `(previous, next)`.
    pub fn on_change(&mut self, listener: impl FnMut(usize, usize) + 'static) -> TabSubscription {
        let subscription = TabSubscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: TabSubscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        before != self.listeners.len()
    }
}

impl std::fmt::Debug for TabShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabShell")
            .field("labels", &self.labels)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
