//! Class, protocol and method model.
//!
//! The [`Registry`] is the compilation context shared by every part of the
//! generator for one unit: declared classes and protocols, their method
//! tables, and file-level globals created by assignment. Definitions live in
//! `Vec`s addressed by [`ClassId`] / [`ProtocolId`]; name maps hold indices.

use objj_ir::{MethodKind, Span};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Index of a class in the registry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ClassId(u32);

/// Index of a protocol in the registry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ProtocolId(u32);

/// Where a method definition came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MethodOrigin {
    /// Written in the compiled source.
    Declared,
    /// Generated for an `@accessors` ivar.
    Synthesized,
    /// Registered by the caller for a class compiled elsewhere.
    External,
}

/// A method signature.
///
/// `types[0]` is the return type, `types[1..]` the parameter types.
/// `type_spans` runs parallel to `types` and points at each annotation
/// (or the best available fallback) for cross-reference notes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDef {
    pub selector: String,
    pub types: SmallVec<[String; 4]>,
    pub type_spans: SmallVec<[Span; 4]>,
    pub span: Span,
    pub origin: MethodOrigin,
}

impl MethodDef {
    /// A signature for a method implemented outside this unit.
    pub fn external(selector: impl Into<String>, types: &[&str]) -> Self {
        MethodDef {
            selector: selector.into(),
            types: types.iter().map(|t| (*t).to_string()).collect(),
            type_spans: types.iter().map(|_| Span::DUMMY).collect(),
            span: Span::DUMMY,
            origin: MethodOrigin::External,
        }
    }

    pub fn type_span(&self, index: usize) -> Span {
        self.type_spans.get(index).copied().unwrap_or(self.span)
    }
}

/// Selector-keyed method table that remembers declaration order.
#[derive(Clone, Debug, Default)]
pub struct MethodTable {
    methods: Vec<MethodDef>,
    by_selector: FxHashMap<String, usize>,
}

impl MethodTable {
    /// Insert or replace the method for its selector.
    pub fn insert(&mut self, method: MethodDef) {
        if let Some(&index) = self.by_selector.get(&method.selector) {
            self.methods[index] = method;
        } else {
            self.by_selector
                .insert(method.selector.clone(), self.methods.len());
            self.methods.push(method);
        }
    }

    pub fn get(&self, selector: &str) -> Option<&MethodDef> {
        self.by_selector.get(selector).map(|&i| &self.methods[i])
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.by_selector.contains_key(selector)
    }

    /// Methods in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// An instance variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IvarDef {
    pub name: String,
    pub ty: String,
    pub has_accessors: bool,
    pub span: Span,
}

/// How much of a class this unit knows.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassKind {
    /// `@implementation` compiled in this unit.
    Implemented,
    /// Named by `@class` or extended by a category before its implementation.
    Forward,
    /// Pre-declared by the caller.
    External,
}

#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: String,
    pub superclass: Option<ClassId>,
    pub protocols: Vec<ProtocolId>,
    pub ivars: Vec<IvarDef>,
    pub instance_methods: MethodTable,
    pub class_methods: MethodTable,
    pub kind: ClassKind,
    /// The class name at its declaration.
    pub span: Span,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, superclass: Option<ClassId>, kind: ClassKind, span: Span) -> Self {
        ClassDef {
            name: name.into(),
            superclass,
            protocols: Vec::new(),
            ivars: Vec::new(),
            instance_methods: MethodTable::default(),
            class_methods: MethodTable::default(),
            kind,
            span,
        }
    }

    pub fn methods(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.instance_methods,
            MethodKind::Class => &self.class_methods,
        }
    }

    pub fn methods_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        match kind {
            MethodKind::Instance => &mut self.instance_methods,
            MethodKind::Class => &mut self.class_methods,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProtocolDef {
    pub name: String,
    pub protocols: Vec<ProtocolId>,
    /// Required methods only; `@optional` methods are not part of conformance.
    pub instance_methods: MethodTable,
    pub class_methods: MethodTable,
    pub span: Span,
}

impl ProtocolDef {
    pub fn new(name: impl Into<String>, protocols: Vec<ProtocolId>, span: Span) -> Self {
        ProtocolDef {
            name: name.into(),
            protocols,
            instance_methods: MethodTable::default(),
            class_methods: MethodTable::default(),
            span,
        }
    }

    pub fn methods(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.instance_methods,
            MethodKind::Class => &self.class_methods,
        }
    }

    pub fn methods_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        match kind {
            MethodKind::Instance => &mut self.instance_methods,
            MethodKind::Class => &mut self.class_methods,
        }
    }
}

/// Compilation context for one unit.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    classes: Vec<ClassDef>,
    classes_by_name: FxHashMap<String, ClassId>,
    protocols: Vec<ProtocolDef>,
    protocols_by_name: FxHashMap<String, ProtocolId>,
    /// Globals created by file-level assignment, with the assignment site.
    globals: FxHashMap<String, Span>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Classes

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0 as usize]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.classes[id.0 as usize]
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes_by_name.get(name).copied()
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassDef> {
        self.class_id(name).map(|id| self.class(id))
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.classes_by_name.contains_key(name)
    }

    /// Register a class, replacing the definition of the same name if any.
    /// The id of a replaced class is kept so references to it stay valid.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        if let Some(id) = self.class_id(&def.name) {
            *self.class_mut(id) = def;
            return id;
        }
        let id = ClassId(u32::try_from(self.classes.len()).unwrap_or(u32::MAX));
        self.classes_by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    /// Pre-declare a class implemented outside this unit.
    pub fn declare_external_class(&mut self, name: &str, superclass: Option<&str>) -> ClassId {
        let superclass = superclass.and_then(|s| self.class_id(s));
        self.add_class(ClassDef::new(name, superclass, ClassKind::External, Span::DUMMY))
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, def)| (ClassId(u32::try_from(i).unwrap_or(u32::MAX)), def))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    /// The class followed by its superclasses, nearest first.
    pub fn ancestors(&self, id: ClassId) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: Some(id),
            remaining: self.classes.len(),
        }
    }

    /// Find an ivar on the class or any superclass.
    pub fn find_ivar(&self, id: ClassId, name: &str) -> Option<(ClassId, &IvarDef)> {
        self.ancestors(id).find_map(|cid| {
            self.class(cid)
                .ivars
                .iter()
                .find(|ivar| ivar.name == name)
                .map(|ivar| (cid, ivar))
        })
    }

    /// Find a method on the class or any superclass.
    pub fn lookup_method(&self, id: ClassId, kind: MethodKind, selector: &str) -> Option<&MethodDef> {
        self.ancestors(id)
            .find_map(|cid| self.class(cid).methods(kind).get(selector))
    }

    // Protocols

    pub fn protocol(&self, id: ProtocolId) -> &ProtocolDef {
        &self.protocols[id.0 as usize]
    }

    pub fn protocol_mut(&mut self, id: ProtocolId) -> &mut ProtocolDef {
        &mut self.protocols[id.0 as usize]
    }

    pub fn protocol_id(&self, name: &str) -> Option<ProtocolId> {
        self.protocols_by_name.get(name).copied()
    }

    pub fn protocol_by_name(&self, name: &str) -> Option<&ProtocolDef> {
        self.protocol_id(name).map(|id| self.protocol(id))
    }

    pub fn add_protocol(&mut self, def: ProtocolDef) -> ProtocolId {
        if let Some(id) = self.protocol_id(&def.name) {
            *self.protocol_mut(id) = def;
            return id;
        }
        let id = ProtocolId(u32::try_from(self.protocols.len()).unwrap_or(u32::MAX));
        self.protocols_by_name.insert(def.name.clone(), id);
        self.protocols.push(def);
        id
    }

    /// Pre-declare a protocol defined outside this unit.
    pub fn declare_external_protocol(&mut self, name: &str, inherits: &[&str]) -> ProtocolId {
        let protocols = inherits.iter().filter_map(|p| self.protocol_id(p)).collect();
        self.add_protocol(ProtocolDef::new(name, protocols, Span::DUMMY))
    }

    /// The given protocols and everything they inherit, each once, in
    /// depth-first declaration order.
    pub fn protocol_closure(&self, roots: &[ProtocolId]) -> Vec<ProtocolId> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut stack: Vec<ProtocolId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.protocol(id).protocols.iter().rev().copied());
        }
        out
    }

    /// A requirement for `selector` in any of the protocols or their parents.
    pub fn lookup_protocol_method(
        &self,
        roots: &[ProtocolId],
        kind: MethodKind,
        selector: &str,
    ) -> Option<&MethodDef> {
        self.protocol_closure(roots)
            .into_iter()
            .find_map(|pid| self.protocol(pid).methods(kind).get(selector))
    }

    // Globals

    pub fn add_global(&mut self, name: &str, span: Span) {
        self.globals.entry(name.to_string()).or_insert(span);
    }

    /// Assignment site of a file-level global.
    pub fn global(&self, name: &str) -> Option<Span> {
        self.globals.get(name).copied()
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }
}

/// Iterator over a class and its superclasses.
///
/// Bounded by the number of registered classes so a malformed cycle ends.
pub struct Ancestors<'a> {
    registry: &'a Registry,
    next: Option<ClassId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.registry.class(current).superclass;
        Some(current)
    }
}

#[cfg(test)]
mod tests;
