//! Execution contexts
//!
//! Contexts live in an arena indexed by [`ContextId`]. The module context is
//! created with the arena and never removed; each user-function call pushes a
//! context whose parent is the caller and pops it on return. Calls nest
//! strictly, so the arena behaves as a stack.
//!
//! Each context remembers the script text its code came from, so frames for
//! functions declared in an earlier REPL entry still show their own lines.

use crate::error::{Frame, Traceback, MODULE_NAME};
use crate::span::{Position, SourceFile};
use crate::symbol::SymbolTable;
use crate::value::Value;
use std::rc::Rc;

/// Index of a context in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(usize);

impl ContextId {
    pub const MODULE: ContextId = ContextId(0);

    pub fn is_module(self) -> bool {
        self == Self::MODULE
    }
}

/// One frame of execution: a named scope plus where it was entered from
#[derive(Debug, Clone)]
pub struct Context {
    /// `<module>` or the called function's name
    pub display_name: String,
    pub parent: Option<ContextId>,
    /// Call-site position in the parent context
    pub parent_entry_pos: Option<Position>,
    pub symbols: SymbolTable,
    /// Script text that positions in this context refer to
    pub source: Rc<SourceFile>,
}

/// Arena of live contexts
#[derive(Debug)]
pub struct Contexts {
    contexts: Vec<Context>,
}

impl Contexts {
    pub fn new(source: Rc<SourceFile>) -> Self {
        Self {
            contexts: vec![Context {
                display_name: MODULE_NAME.to_string(),
                parent: None,
                parent_entry_pos: None,
                symbols: SymbolTable::new(),
                source,
            }],
        }
    }

    /// Script text of the module context
    pub fn source(&self) -> &Rc<SourceFile> {
        &self.module().source
    }

    /// Point module-level tracebacks at a new script text, keeping all bindings
    pub fn set_source(&mut self, source: Rc<SourceFile>) {
        self.contexts[ContextId::MODULE.0].source = source;
    }

    pub fn get(&self, id: ContextId) -> &Context {
        &self.contexts[id.0]
    }

    pub fn module(&self) -> &Context {
        self.get(ContextId::MODULE)
    }

    /// Number of live function calls
    pub fn call_depth(&self) -> usize {
        self.contexts.len() - 1
    }

    /// Enter a call to a function whose body was read from `source`
    pub fn push(
        &mut self,
        name: &str,
        parent: ContextId,
        entry: Position,
        source: Rc<SourceFile>,
    ) -> ContextId {
        let id = ContextId(self.contexts.len());
        log::trace!("enter '{}' (depth {})", name, id.0);
        self.contexts.push(Context {
            display_name: name.to_string(),
            parent: Some(parent),
            parent_entry_pos: Some(entry),
            symbols: SymbolTable::new(),
            source,
        });
        id
    }

    /// Leave the innermost function call. The module context is never popped.
    pub fn pop(&mut self) {
        if self.contexts.len() > 1 {
            if let Some(ctx) = self.contexts.pop() {
                log::trace!("leave '{}'", ctx.display_name);
            }
        }
    }

    /// Read a variable as seen from `id`: the local table first, then each
    /// parent in turn out to the module.
    ///
    /// Reads never create bindings; assignment decides separately between
    /// the local table and the module.
    pub fn lookup(&self, id: ContextId, name: &str) -> Option<&Value> {
        let mut current = Some(id);
        while let Some(ctx_id) = current {
            let ctx = self.get(ctx_id);
            if let Some(value) = ctx.symbols.get(name) {
                return Some(value);
            }
            current = ctx.parent;
        }
        None
    }

    /// Bind a variable from `id`.
    ///
    /// Inside a function, `global` assignments and assignments to names
    /// already declared global (and not shadowed locally) write to the
    /// module table.
    pub fn assign(&mut self, id: ContextId, name: &str, value: Value, declared_global: bool) {
        let writes_module = !id.is_module()
            && (declared_global
                || (!self.get(id).symbols.contains(name)
                    && self.module().symbols.global_from_child(name)));

        if writes_module {
            self.contexts[ContextId::MODULE.0]
                .symbols
                .set(name, value, true);
        } else {
            self.contexts[id.0].symbols.set(name, value, declared_global);
        }
    }

    /// Bind a name in `id`'s own table, ignoring global declarations.
    /// Used for function parameters.
    pub fn bind_local(&mut self, id: ContextId, name: &str, value: Value) {
        self.contexts[id.0].symbols.set(name, value, false);
    }

    /// Snapshot the call stack from `id` outward, outermost frame first.
    pub fn traceback(&self, id: ContextId, pos: Position) -> Traceback {
        let mut frames = Vec::new();
        let mut current = Some(id);
        let mut pos = pos;
        while let Some(ctx_id) = current {
            let ctx = self.get(ctx_id);
            frames.push(Frame::new(&ctx.source, ctx.display_name.as_str(), pos));
            pos = ctx.parent_entry_pos.unwrap_or(pos);
            current = ctx.parent;
        }
        frames.reverse();
        Traceback::new(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "f(x) {\n  return x / 0\n}\nf(1)\n";

    fn contexts() -> Contexts {
        Contexts::new(SourceFile::new("t.ahk", TEXT))
    }

    fn enter(ctxs: &mut Contexts, parent: ContextId, entry: Position) -> ContextId {
        let source = Rc::clone(ctxs.source());
        ctxs.push("f", parent, entry, source)
    }

    #[test]
    fn test_local_assignment_stays_local() {
        let mut ctxs = contexts();
        let call = enter(&mut ctxs, ContextId::MODULE, Position::new(0, 4, 1));
        ctxs.assign(call, "x", Value::decimal(1), false);
        assert_eq!(ctxs.lookup(call, "x"), Some(&Value::decimal(1)));
        assert_eq!(ctxs.lookup(ContextId::MODULE, "x"), None);
    }

    #[test]
    fn test_global_assignment_reaches_module() {
        let mut ctxs = contexts();
        let call = enter(&mut ctxs, ContextId::MODULE, Position::new(0, 4, 1));
        ctxs.assign(call, "g", Value::decimal(5), true);
        ctxs.assign(call, "G", Value::decimal(6), false);
        ctxs.pop();
        assert_eq!(ctxs.lookup(ContextId::MODULE, "g"), Some(&Value::decimal(6)));
    }

    #[test]
    fn test_lookup_walks_the_parent_chain() {
        let mut ctxs = contexts();
        ctxs.assign(ContextId::MODULE, "m", Value::decimal(1), false);
        let outer = enter(&mut ctxs, ContextId::MODULE, Position::new(0, 4, 1));
        ctxs.assign(outer, "y", Value::decimal(5), false);
        let inner = enter(&mut ctxs, outer, Position::new(9, 2, 3));
        assert_eq!(ctxs.lookup(inner, "m"), Some(&Value::decimal(1)));
        assert_eq!(ctxs.lookup(inner, "Y"), Some(&Value::decimal(5)));
    }

    #[test]
    fn test_plain_assignment_shadows_instead_of_writing_parent() {
        let mut ctxs = contexts();
        ctxs.assign(ContextId::MODULE, "m", Value::decimal(1), false);
        let call = enter(&mut ctxs, ContextId::MODULE, Position::new(0, 4, 1));
        ctxs.assign(call, "m", Value::decimal(2), false);
        assert_eq!(ctxs.lookup(call, "m"), Some(&Value::decimal(2)));
        ctxs.pop();
        assert_eq!(ctxs.lookup(ContextId::MODULE, "m"), Some(&Value::decimal(1)));
    }

    #[test]
    fn test_traceback_is_outermost_first() {
        let mut ctxs = contexts();
        let call = enter(&mut ctxs, ContextId::MODULE, Position::new(20, 4, 1));
        let tb = ctxs.traceback(call, Position::new(9, 2, 3));
        let frames: Vec<_> = tb
            .frames()
            .iter()
            .map(|f| (f.context.as_str(), f.line, f.source_line.as_str()))
            .collect();
        assert_eq!(
            frames,
            vec![("<module>", 4, "f(1)"), ("f", 2, "return x / 0")]
        );
    }

    #[test]
    fn test_frames_use_each_context_source() {
        let mut ctxs = contexts();
        let declared = Rc::clone(ctxs.source());
        ctxs.set_source(SourceFile::new("t.ahk", "f(1)"));
        let call = ctxs.push("f", ContextId::MODULE, Position::new(0, 1, 1), declared);
        let tb = ctxs.traceback(call, Position::new(9, 2, 3));
        let lines: Vec<_> = tb.frames().iter().map(|f| f.source_line.as_str()).collect();
        assert_eq!(lines, vec!["f(1)", "return x / 0"]);
    }

    #[test]
    fn test_pop_keeps_module() {
        let mut ctxs = contexts();
        ctxs.pop();
        assert_eq!(ctxs.call_depth(), 0);
        assert_eq!(ctxs.module().display_name, "<module>");
    }
}
