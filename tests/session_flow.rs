//! End-to-end gate flow against a fake DOM and the tokio timer.

use docgate::integrations::diagrams::{
    DiagramRenderer, DiagramSettings, DiagramSync, DiagramTheme,
};
use docgate::{
    sha256_hex, AccessGate, Credential, GateConfig, GateError, GateState, MemorySessionStore,
    Overlay, Page, SessionStore, TokioTimer, UnlockOutcome, Visibility,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct Dom {
    visibility: Visibility,
    overlay: Option<Overlay>,
    mounts: usize,
    error: Option<String>,
    input: String,
    classes: Vec<String>,
    opacity_zero: bool,
}

/// Minimal stand-in for a browser document.
struct FakeDom {
    dom: Mutex<Dom>,
}

impl FakeDom {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            dom: Mutex::new(Dom {
                visibility: Visibility::Visible,
                overlay: None,
                mounts: 0,
                error: None,
                input: String::new(),
                classes: Vec::new(),
                opacity_zero: false,
            }),
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Dom) -> R) -> R {
        f(&mut self.dom.lock().unwrap())
    }

    fn overlay_op(&self, f: impl FnOnce(&mut Dom)) -> Result<(), GateError> {
        self.with(|dom| {
            if dom.overlay.is_none() {
                return Err(GateError::PageError("no overlay".to_string()));
            }
            f(dom);
            Ok(())
        })
    }
}

impl Page for FakeDom {
    fn set_visibility(&self, visibility: Visibility) -> Result<(), GateError> {
        self.with(|dom| dom.visibility = visibility);
        Ok(())
    }

    fn visibility(&self) -> Visibility {
        self.with(|dom| dom.visibility)
    }

    async fn when_ready(&self) -> Result<(), GateError> {
        Ok(())
    }

    fn root_attribute(&self, _name: &str) -> Option<String> {
        None
    }

    fn mount_overlay(&self, overlay: &Overlay) -> Result<(), GateError> {
        self.with(|dom| {
            dom.overlay = Some(overlay.clone());
            dom.mounts += 1;
        });
        Ok(())
    }

    fn show_error(&self, text: &str) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.error = Some(text.to_string()))
    }

    fn clear_input(&self) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.input.clear())
    }

    fn focus_input(&self) -> Result<(), GateError> {
        self.overlay_op(|_| {})
    }

    fn add_overlay_class(&self, class: &str) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.classes.push(class.to_string()))
    }

    fn remove_overlay_class(&self, class: &str) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.classes.retain(|c| c != class))
    }

    fn fade_overlay(&self) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.opacity_zero = true)
    }

    fn remove_overlay(&self) -> Result<(), GateError> {
        self.overlay_op(|dom| dom.overlay = None)
    }
}

fn gate_for(
    store: &Arc<MemorySessionStore>,
    dom: &Arc<FakeDom>,
    config: GateConfig,
) -> AccessGate<Arc<MemorySessionStore>, FakeDom, TokioTimer> {
    AccessGate::new(
        config,
        Arc::clone(store),
        Arc::clone(dom),
        TokioTimer::current().unwrap(),
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn unlock_persists_for_the_session() {
    let store = Arc::new(MemorySessionStore::new());

    // First page load
    let dom = FakeDom::new();
    let mut gate = gate_for(&store, &dom, GateConfig::default());
    assert_eq!(gate.initialize().await.unwrap(), GateState::Locked);
    assert_eq!(dom.visibility(), Visibility::Hidden);

    assert!(matches!(
        gate.attempt_unlock("gee2026").await,
        UnlockOutcome::Unlocked
    ));
    assert_eq!(store.get("auth_token_gee").unwrap().as_deref(), Some("true"));
    dom.with(|d| {
        assert!(d.opacity_zero);
        assert!(d.overlay.is_some());
    });

    tokio::time::sleep(Duration::from_millis(301)).await;
    dom.with(|d| {
        assert!(d.overlay.is_none());
        assert_eq!(d.visibility, Visibility::Visible);
    });

    // Next page load in the same session
    let next_dom = FakeDom::new();
    let mut next_gate = gate_for(&store, &next_dom, GateConfig::default());
    assert_eq!(next_gate.initialize().await.unwrap(), GateState::Unlocked);
    next_dom.with(|d| {
        assert_eq!(d.mounts, 0);
        assert_eq!(d.visibility, Visibility::Visible);
    });
}

#[tokio::test(start_paused = true)]
async fn wrong_password_shakes_for_half_a_second() {
    let store = Arc::new(MemorySessionStore::new());
    let dom = FakeDom::new();
    let mut gate = gate_for(&store, &dom, GateConfig::default());
    gate.initialize().await.unwrap();
    dom.with(|d| d.input = "wrong".to_string());

    assert!(matches!(
        gate.attempt_unlock("wrong").await,
        UnlockOutcome::Rejected
    ));
    dom.with(|d| {
        assert!(d.error.is_some());
        assert!(d.input.is_empty());
        assert_eq!(d.classes, vec!["shake".to_string()]);
    });

    tokio::time::sleep(Duration::from_millis(499)).await;
    dom.with(|d| assert_eq!(d.classes.len(), 1));

    tokio::time::sleep(Duration::from_millis(2)).await;
    dom.with(|d| {
        assert!(d.classes.is_empty());
        assert!(d.overlay.is_some());
        assert_eq!(d.visibility, Visibility::Hidden);
    });
    assert_eq!(store.get("auth_token_gee").unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn session_end_locks_again() {
    let store = Arc::new(MemorySessionStore::new());
    let dom = FakeDom::new();
    let mut gate = gate_for(&store, &dom, GateConfig::default());
    gate.initialize().await.unwrap();
    gate.attempt_unlock("gee2026").await;

    store.clear().unwrap();

    let fresh_dom = FakeDom::new();
    let mut fresh_gate = gate_for(&store, &fresh_dom, GateConfig::default());
    assert_eq!(fresh_gate.initialize().await.unwrap(), GateState::Locked);
    fresh_dom.with(|d| assert_eq!(d.mounts, 1));
}

#[tokio::test(start_paused = true)]
async fn custom_credential_and_key() {
    let digest: &'static str = Box::leak(sha256_hex("open sesame").into_boxed_str());
    let config = GateConfig {
        storage_key: "handbook_unlocked",
        credential: Credential::Sha256Hex(digest),
        ..GateConfig::default()
    };
    let store = Arc::new(MemorySessionStore::new());
    let dom = FakeDom::new();
    let mut gate = gate_for(&store, &dom, config);
    gate.initialize().await.unwrap();

    assert!(matches!(
        gate.attempt_unlock("gee2026").await,
        UnlockOutcome::Rejected
    ));
    assert!(gate.attempt_unlock("open sesame").await.is_unlocked());
    assert_eq!(store.get("handbook_unlocked").unwrap().as_deref(), Some("true"));
    assert_eq!(store.get("auth_token_gee").unwrap(), None);
}

#[derive(Default)]
struct RecordingRenderer {
    themes: Mutex<Vec<DiagramTheme>>,
    runs: Mutex<Vec<String>>,
}

impl DiagramRenderer for RecordingRenderer {
    fn initialize(&self, settings: &DiagramSettings) -> Result<(), GateError> {
        self.themes.lock().unwrap().push(settings.theme);
        Ok(())
    }

    fn run(&self, selector: &str) -> Result<usize, GateError> {
        self.runs.lock().unwrap().push(selector.to_string());
        Ok(3)
    }
}

#[tokio::test(start_paused = true)]
async fn diagrams_render_once_the_gate_reveals_the_page() {
    let store = Arc::new(MemorySessionStore::new());
    let dom = FakeDom::new();
    let mut gate = gate_for(&store, &dom, GateConfig::default());
    let renderer = Arc::new(RecordingRenderer::default());
    let mut diagrams = DiagramSync::for_gate(Arc::clone(&renderer), gate.config());

    gate.initialize().await.unwrap();
    assert_eq!(diagrams.on_navigation(dom.as_ref()).unwrap(), None);
    assert!(diagrams.is_deferred());

    assert!(gate.attempt_unlock("gee2026").await.is_unlocked());

    // Still fading, content not shown yet
    assert_eq!(diagrams.on_visible(dom.as_ref()).unwrap(), None);
    assert!(renderer.runs.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(301)).await;
    assert_eq!(dom.visibility(), Visibility::Visible);
    assert_eq!(diagrams.on_visible(dom.as_ref()).unwrap(), Some(3));
    assert!(!diagrams.is_deferred());
    assert_eq!(*renderer.runs.lock().unwrap(), vec![".mermaid".to_string()]);
    assert_eq!(*renderer.themes.lock().unwrap(), vec![DiagramTheme::Default]);

    // Nothing pending any more
    assert_eq!(diagrams.on_visible(dom.as_ref()).unwrap(), None);
}
