//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use regex_lab::engine::{CompiledMatcher, NativeRegex, RawMatch, RegexPrimitive};
use regex_lab::library::KeyValueStore;
use regex_lab::{LabError, Result};

/// A primitive whose matcher replays a fixed list of matches, ignoring the pattern.
pub struct ScriptedPrimitive {
    matches: Vec<RawMatch>,
}

impl ScriptedPrimitive {
    pub fn new(matches: Vec<RawMatch>) -> Arc<Self> {
        Arc::new(Self { matches })
    }
}

impl RegexPrimitive for ScriptedPrimitive {
    fn compile(&self, _pattern: &str, _flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        Ok(Arc::new(ScriptedMatcher {
            matches: self.matches.clone(),
        }))
    }
}

struct ScriptedMatcher {
    matches: Vec<RawMatch>,
}

impl CompiledMatcher for ScriptedMatcher {
    fn exec_from(&self, _text: &str, from: usize) -> Result<Option<RawMatch>> {
        Ok(self.matches.iter().find(|m| m.index >= from).cloned())
    }
}

/// A primitive that compiles everything and fails on every search.
pub struct FailingPrimitive;

impl RegexPrimitive for FailingPrimitive {
    fn compile(&self, _pattern: &str, _flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        Ok(Arc::new(FailingMatcher))
    }
}

struct FailingMatcher;

impl CompiledMatcher for FailingMatcher {
    fn exec_from(&self, _text: &str, _from: usize) -> Result<Option<RawMatch>> {
        Err(LabError::match_execution("backtrack limit exceeded"))
    }
}

/// The native primitive with a count of compile calls.
#[derive(Default)]
pub struct CountingPrimitive {
    inner: NativeRegex,
    compiles: AtomicUsize,
}

impl CountingPrimitive {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn compiles(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }
}

impl RegexPrimitive for CountingPrimitive {
    fn compile(&self, pattern: &str, flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(pattern, flags)
    }
}

/// The native primitive with a fixed, thread-blocking delay on every compile.
pub struct SlowPrimitive {
    inner: NativeRegex,
    delay: Duration,
}

impl SlowPrimitive {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: NativeRegex::default(),
            delay,
        })
    }
}

impl RegexPrimitive for SlowPrimitive {
    fn compile(&self, pattern: &str, flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        std::thread::sleep(self.delay);
        self.inner.compile(pattern, flags)
    }
}

/// The native primitive whose compiles each wait for one [`Gate::open`].
///
/// Dropping the gate lets every waiting and later compile through.
pub struct GatedPrimitive {
    inner: NativeRegex,
    permits: Mutex<mpsc::Receiver<()>>,
}

pub struct Gate(mpsc::Sender<()>);

impl Gate {
    pub fn open(&self) {
        let _ = self.0.send(());
    }
}

impl GatedPrimitive {
    pub fn new() -> (Gate, Arc<Self>) {
        let (tx, rx) = mpsc::channel();
        let primitive = Arc::new(Self {
            inner: NativeRegex::default(),
            permits: Mutex::new(rx),
        });
        (Gate(tx), primitive)
    }
}

impl RegexPrimitive for GatedPrimitive {
    fn compile(&self, pattern: &str, flags: &str) -> Result<Arc<dyn CompiledMatcher>> {
        let _ = self.permits.lock().unwrap().recv();
        self.inner.compile(pattern, flags)
    }
}

/// Key-value storage whose contents stay visible after the library takes ownership.
#[derive(Clone, Default)]
pub struct SharedStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.put(key, value);
        Ok(())
    }
}

/// Storage that cannot be written.
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(LabError::persistence(key, "quota exceeded"))
    }
}

pub fn raw(text: &str, index: usize) -> RawMatch {
    RawMatch {
        text: text.to_string(),
        index,
        groups: Vec::new(),
    }
}
