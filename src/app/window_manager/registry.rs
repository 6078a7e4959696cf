use crate::app::infrastructure::error::{AppError, Result};

use super::{RegisteredWindow, Window, WindowMeta};

type Factory = fn() -> Box<dyn Window>;

fn make_default<T: RegisteredWindow>() -> Box<dyn Window> {
    Box::new(T::default())
}

/// A registered window kind: its metadata plus a factory for a fresh
/// default instance.
#[derive(Clone, Copy)]
pub struct WindowDescriptor {
    pub meta: WindowMeta,
    factory: Factory,
}

impl WindowDescriptor {
    pub fn create(&self) -> Box<dyn Window> {
        (self.factory)()
    }
}

impl std::fmt::Debug for WindowDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowDescriptor")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Named window factories, kept in registration order.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    entries: Vec<WindowDescriptor>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: RegisteredWindow>(&mut self) -> Result<()> {
        let meta = T::META;
        if self.get(meta.name).is_some() {
            return Err(AppError::DuplicateWindow(meta.name.to_string()));
        }
        tracing::debug!("Registered window {} ({}/{})", meta.name, meta.category, meta.title);
        self.entries.push(WindowDescriptor {
            meta,
            factory: make_default::<T>,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&WindowDescriptor> {
        self.entries.iter().find(|d| d.meta.name == name)
    }

    /// Build a default instance of the window registered as `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Window>> {
        self.get(name)
            .map(WindowDescriptor::create)
            .ok_or_else(|| AppError::UnknownWindow(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> =
            self.entries.iter().map(|d| d.meta.category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a WindowDescriptor> {
        self.entries
            .iter()
            .filter(move |d| d.meta.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::window_manager::WindowContext;

    #[derive(Default)]
    struct Probe;

    impl Window for Probe {
        fn render(&mut self, _ctx: &mut WindowContext<'_>) {}
    }

    impl RegisteredWindow for Probe {
        const META: WindowMeta = WindowMeta {
            name: "probe",
            category: "Debug",
            title: "Probe",
            default_visible: true,
        };
    }

    #[derive(Default)]
    struct Other;

    impl Window for Other {
        fn render(&mut self, _ctx: &mut WindowContext<'_>) {}
    }

    impl RegisteredWindow for Other {
        const META: WindowMeta = WindowMeta {
            name: "other",
            category: "Tools",
            title: "Other",
            default_visible: false,
        };
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = WindowRegistry::new();
        registry.register::<Probe>().unwrap();

        let desc = registry.get("probe").unwrap();
        assert_eq!(desc.meta.title, "Probe");
        assert_eq!(desc.meta.category, "Debug");
        assert!(desc.meta.default_visible);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = WindowRegistry::new();
        registry.register::<Probe>().unwrap();
        let err = registry.register::<Probe>().unwrap_err();
        assert!(matches!(err, AppError::DuplicateWindow(ref name) if name == "probe"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_unknown() {
        let registry = WindowRegistry::new();
        assert!(registry.is_empty());
        let err = registry.create("missing").err().unwrap();
        assert!(matches!(err, AppError::UnknownWindow(ref name) if name == "missing"));
    }

    #[test]
    fn test_create_known() {
        let mut registry = WindowRegistry::new();
        registry.register::<Probe>().unwrap();
        assert!(registry.create("probe").is_ok());
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let mut registry = WindowRegistry::new();
        registry.register::<Other>().unwrap();
        registry.register::<Probe>().unwrap();
        assert_eq!(registry.categories(), vec!["Debug", "Tools"]);

        let tools: Vec<_> = registry.in_category("Tools").map(|d| d.meta.name).collect();
        assert_eq!(tools, vec!["other"]);
    }

    #[test]
    fn test_iter_keeps_registration_order() {
        let mut registry = WindowRegistry::new();
        registry.register::<Other>().unwrap();
        registry.register::<Probe>().unwrap();
        let names: Vec<_> = registry.iter().map(|d| d.meta.name).collect();
        assert_eq!(names, vec!["other", "probe"]);
    }
}
