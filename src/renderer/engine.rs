//! Component rendering on top of a minijinja environment

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use minijinja::value::{Enumerator, Object, ValueKind};
use minijinja::{path_loader, AutoEscape, Environment, Value};
use tracing::debug;

use super::config::{EngineConfig, ScriptPlacement};
use super::script::find_script;
use crate::component::{Component, Nested};
use crate::registry::Registry;
use crate::template::{Manifest, ManifestError, TemplateError, TemplateResolver};
use crate::RenderError;

/// Context key holding the inlined script, or none
pub const INLINE_SCRIPT_KEY: &str = "inline_script";

type Context = BTreeMap<String, Value>;

/// Renders components through their templates
///
/// Build one at startup and share it; each render call takes the caller's
/// [`Registry`] for global lookups.
#[derive(Debug, Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

#[derive(Debug, Clone)]
struct EngineInner {
    env: Environment<'static>,
    resolver: TemplateResolver,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine, validating every registered template up front
    pub fn new(resolver: TemplateResolver, config: EngineConfig) -> Result<Self, TemplateError> {
        resolver.validate()?;

        let mut env = Environment::new();
        env.set_loader(path_loader(resolver.root().to_path_buf()));
        env.set_keep_trailing_newline(config.keep_trailing_newline);
        if !config.auto_escape {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }

        debug!(
            root = %resolver.root().display(),
            kinds = resolver.len(),
            "engine ready"
        );
        Ok(Self {
            inner: Arc::new(EngineInner {
                env,
                resolver,
                config,
            }),
        })
    }

    /// Create an engine from a parsed manifest
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, TemplateError> {
        Self::new(manifest.resolver()?, manifest.engine.clone())
    }

    /// Create an engine from a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let manifest = Manifest::from_file(path)?;
        Ok(Self::from_manifest(&manifest)?)
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.inner.resolver
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// The underlying environment, for adding filters, functions or globals
    pub fn env_mut(&mut self) -> &mut Environment<'static> {
        &mut Arc::make_mut(&mut self.inner).env
    }

    /// Render a component and everything nested in it
    ///
    /// Registry entries are visible to every template of the pass, including
    /// included and extended ones, and are rendered only when looked up.
    pub fn render(&self, registry: &Registry, component: &dyn Component) -> Result<String, RenderError> {
        let pass = Arc::new(RenderPass {
            engine: Arc::clone(&self.inner),
            globals: registry.get().clone(),
            stack: Mutex::new(Vec::new()),
            deferred: Mutex::new(None),
        });
        pass.render(component)
    }
}

/// State shared by every template rendered during one `Engine::render` call
#[derive(Debug)]
struct RenderPass {
    engine: Arc<EngineInner>,
    globals: HashMap<String, Arc<dyn Component>>,
    /// Ids of the components currently being rendered, outermost first
    stack: Mutex<Vec<String>>,
    /// First error raised while rendering a global from inside a template
    deferred: Mutex<Option<RenderError>>,
}

impl RenderPass {
    fn render(self: &Arc<Self>, component: &dyn Component) -> Result<String, RenderError> {
        let id = component.id();
        {
            let mut stack = lock(&self.stack);
            if stack.iter().any(|active| active == id) {
                return Err(RenderError::Cycle {
                    chain: format!("{} -> {}", stack.join(" -> "), id),
                });
            }
            stack.push(id.to_string());
        }

        let result = self.render_frame(component);
        lock(&self.stack).pop();
        result
    }

    fn render_frame(self: &Arc<Self>, component: &dyn Component) -> Result<String, RenderError> {
        let engine = &self.engine;
        let entry = engine.resolver.resolve(component.kind())?;
        debug!(id = component.id(), kind = component.kind(), template = entry.name(), "rendering");

        let template = engine.env.get_template(entry.name())?;
        let fragments = component
            .base()
            .html()
            .iter()
            .map(|name| Ok((name.as_str(), engine.env.get_template(name)?)))
            .collect::<Result<Vec<_>, minijinja::Error>>()?;

        let fields = field_context(component)?;
        let mut provided = self.render_nested(component)?;

        let script = find_script(component, entry)?;
        let script_value = match &script {
            Some(script) => Value::from_safe_string(script.contents.clone()),
            None => Value::from(()),
        };
        provided.insert(INLINE_SCRIPT_KEY.to_string(), script_value);

        for (name, fragment) in fragments {
            let rendered = fragment.render(self.scope(&fields, &provided));
            let markup = Value::from_safe_string(self.settle(rendered)?);
            if let Some(stem) = Path::new(name).file_stem().and_then(|s| s.to_str()) {
                provided.insert(stem.to_string(), markup.clone());
            }
            provided.insert(name.to_string(), markup);
        }

        let rendered = template.render(self.scope(&fields, &provided));
        let mut output = self.settle(rendered)?;
        if let (Some(script), ScriptPlacement::Append) = (&script, engine.config.script_placement) {
            output.push_str(&script.to_tag());
        }
        Ok(output)
    }

    /// Render nested components, keyed by child id and by field name
    fn render_nested(self: &Arc<Self>, component: &dyn Component) -> Result<Context, RenderError> {
        let mut rendered = Context::new();
        for nested in component.nested() {
            match nested {
                Nested::One { field, component } => {
                    let markup = self.render_child(component, &mut rendered)?;
                    rendered.insert(field.to_string(), markup);
                }
                Nested::Many { field, components } => {
                    let mut items = Vec::with_capacity(components.len());
                    for child in components {
                        items.push(self.render_child(child, &mut rendered)?);
                    }
                    rendered.insert(field.to_string(), Value::from(items));
                }
                Nested::Keyed { field, components } => {
                    let mut items = BTreeMap::new();
                    for (key, child) in components {
                        items.insert(key, self.render_child(child, &mut rendered)?);
                    }
                    rendered.insert(field.to_string(), Value::from_serialize(&items));
                }
            }
        }
        Ok(rendered)
    }

    fn render_child(
        self: &Arc<Self>,
        child: &dyn Component,
        rendered: &mut Context,
    ) -> Result<Value, RenderError> {
        let markup = Value::from_safe_string(self.render(child)?);
        rendered.insert(child.id().to_string(), markup.clone());
        Ok(markup)
    }

    /// Template context for one component
    fn scope(self: &Arc<Self>, fields: &Context, provided: &Context) -> Value {
        Value::from_object(Scope {
            pass: Arc::clone(self),
            fields: fields.clone(),
            provided: provided.clone(),
        })
    }

    /// Render a registry entry looked up by a template
    fn render_global(self: &Arc<Self>, name: &str) -> Option<Value> {
        let global = self.globals.get(name)?;
        match self.render(global.as_ref()) {
            Ok(markup) => Some(Value::from_safe_string(markup)),
            Err(err) => {
                let mut deferred = lock(&self.deferred);
                if deferred.is_none() {
                    *deferred = Some(err);
                }
                None
            }
        }
    }

    /// Finish a template render, surfacing errors raised by global lookups
    fn settle(&self, rendered: Result<String, minijinja::Error>) -> Result<String, RenderError> {
        if let Some(err) = lock(&self.deferred).take() {
            return Err(err);
        }
        Ok(rendered?)
    }
}

/// Root context of a template: engine-provided values, then registry
/// globals, then the component's own fields
#[derive(Debug)]
struct Scope {
    pass: Arc<RenderPass>,
    fields: Context,
    provided: Context,
}

impl Object for Scope {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let name = key.as_str()?;
        if let Some(value) = self.provided.get(name) {
            return Some(value.clone());
        }
        if self.pass.globals.contains_key(name) {
            return self.pass.render_global(name);
        }
        self.fields.get(name).cloned()
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        let names: BTreeSet<&str> = self
            .provided
            .keys()
            .chain(self.pass.globals.keys())
            .chain(self.fields.keys())
            .map(|name| name.as_str())
            .collect();
        Enumerator::Values(names.into_iter().map(Value::from).collect())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Declared fields of a component as context entries
fn field_context(component: &dyn Component) -> Result<Context, RenderError> {
    let fields = component.fields();
    if fields.kind() != ValueKind::Map {
        return Err(RenderError::InvalidFields {
            id: component.id().to_string(),
        });
    }

    let mut ctx = Context::new();
    for key in fields.try_iter()? {
        let value = fields.get_item(&key)?;
        if let Some(name) = key.as_str() {
            ctx.insert(name.to_string(), value);
        }
    }
    Ok(ctx)
}
