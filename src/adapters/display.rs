use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

const BAR_CELLS: i64 = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: Option<String>,
    pub width_percent: Option<i64>,
}

/// In-memory page: elements addressed by ID, shared by every component.
///
/// Clones share the same elements. Writes are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    elements: Arc<Mutex<BTreeMap<String, Element>>>,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Element>> {
        // 寫入只是替換字串, 中毒的鎖內容仍然可用
        self.elements.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_text(&self, id: &str, text: impl Into<String>) {
        let text = text.into();
        tracing::trace!("#{} <- {}", id, text);
        self.lock().entry(id.to_string()).or_default().text = Some(text);
    }

    pub fn set_width(&self, id: &str, percent: i64) {
        self.lock().entry(id.to_string()).or_default().width_percent = Some(percent);
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().get(id).and_then(|e| e.text.clone())
    }

    pub fn width(&self, id: &str) -> Option<i64> {
        self.lock().get(id).and_then(|e| e.width_percent)
    }

    pub fn snapshot(&self) -> BTreeMap<String, Element> {
        self.lock().clone()
    }

    /// One-line rendering of every element, in ID order.
    pub fn render(&self) -> String {
        let elements = self.snapshot();
        let parts: Vec<String> = elements
            .iter()
            .map(|(id, element)| match (&element.text, element.width_percent) {
                (Some(text), _) => format!("{}: {}", id, text),
                (None, Some(width)) => format!("{}: {}", id, render_bar(width)),
                (None, None) => format!("{}: -", id),
            })
            .collect();
        parts.join(" | ")
    }

    pub fn render_line(&self) -> String {
        format!(
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            self.render()
        )
    }
}

fn render_bar(percent: i64) -> String {
    let filled = (percent.clamp(0, 100) * BAR_CELLS / 100) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_CELLS as usize - filled)
    )
}

/// Range control owning the PWM value, bounded like an HTML range input.
#[derive(Debug, Clone)]
pub struct SliderControl {
    value: Arc<AtomicI64>,
    min: i64,
    max: i64,
}

impl SliderControl {
    pub fn new(min: i64, max: i64, initial: i64) -> Self {
        Self {
            value: Arc::new(AtomicI64::new(initial.clamp(min, max))),
            min,
            max,
        }
    }

    /// 設定數值 (超出範圍時夾到邊界), 回傳實際值
    pub fn set(&self, value: i64) -> i64 {
        let value = value.clamp(self.min, self.max);
        self.value.store(value, Ordering::SeqCst);
        value
    }

    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }
}

impl Default for SliderControl {
    fn default() -> Self {
        Self::new(0, 100, 0)
    }
}
