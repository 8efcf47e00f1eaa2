//! Package registry and scoped type lookup.
//!
//! Message descriptors are registered under their file's package path, which
//! builds a tree of packages rooted at the unnamed package.  Lookups follow
//! protobuf scoping:
//!
//! 1. **Absolute**: a name starting with `.` is resolved from the root.
//! 2. **Relative**: any other name is tried in the current package, then in
//!    each enclosing package out to the root; the first hit wins.
//! 3. **Compound names**: for `a.b.C`, the leading segment is first taken as
//!    a child package and, failing that, as a message whose nested types hold
//!    the rest of the path.

use std::collections::HashMap;

use prost_types::DescriptorProto;
use tracing::debug;

/// Handle to a package node inside a [`NamespaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(usize);

#[derive(Debug)]
struct Package<'a> {
    /// Fully qualified dotted path; empty for the root.
    name: String,
    parent: Option<PackageId>,
    children: HashMap<String, PackageId>,
    types: HashMap<String, &'a DescriptorProto>,
}

impl<'a> Package<'a> {
    fn new(name: String, parent: Option<PackageId>) -> Self {
        Self {
            name,
            parent,
            children: HashMap::new(),
            types: HashMap::new(),
        }
    }
}

/// Registry of message descriptors keyed by package, borrowed from the
/// request for the lifetime `'a`.
///
/// Packages live in an arena; child links own by index and parent links are
/// plain back-indices, so ownership only flows from the root downwards.
#[derive(Debug)]
pub struct NamespaceTree<'a> {
    packages: Vec<Package<'a>>,
}

impl Default for NamespaceTree<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> NamespaceTree<'a> {
    const ROOT: PackageId = PackageId(0);

    pub fn new() -> Self {
        Self {
            packages: vec![Package::new(String::new(), None)],
        }
    }

    pub fn root(&self) -> PackageId {
        Self::ROOT
    }

    /// Fully qualified name of `package` (empty for the root).
    pub fn package_name(&self, package: PackageId) -> &str {
        &self.package(package).name
    }

    pub fn parent(&self, package: PackageId) -> Option<PackageId> {
        self.package(package).parent
    }

    fn package(&self, id: PackageId) -> &Package<'a> {
        &self.packages[id.0]
    }

    /// Insert `message` under `package_path`, creating missing packages on
    /// the way.  `None` and the empty path register at the root; a leading
    /// `.` is ignored.
    pub fn register(&mut self, package_path: Option<&str>, message: &'a DescriptorProto) {
        let mut current = Self::ROOT;
        if let Some(path) = package_path {
            for segment in path.split('.') {
                if current == Self::ROOT && segment.is_empty() {
                    continue;
                }
                current = self.child_or_insert(current, segment);
            }
        }
        debug!(
            message = message.name(),
            package = self.package_name(current),
            "registered message type"
        );
        self.packages[current.0]
            .types
            .insert(message.name().to_string(), message);
    }

    fn child_or_insert(&mut self, parent: PackageId, segment: &str) -> PackageId {
        if let Some(child) = self.package(parent).children.get(segment) {
            return *child;
        }
        let parent_name = &self.package(parent).name;
        let name = if parent_name.is_empty() {
            segment.to_string()
        } else {
            format!("{parent_name}.{segment}")
        };
        let child = PackageId(self.packages.len());
        self.packages.push(Package::new(name, Some(parent)));
        self.packages[parent.0]
            .children
            .insert(segment.to_string(), child);
        child
    }

    /// Resolve `name` strictly from the root, ignoring a leading `.`.
    pub fn lookup_absolute(&self, name: &str) -> Option<&'a DescriptorProto> {
        let name = name.strip_prefix('.').unwrap_or(name);
        self.relatively_lookup(Self::ROOT, name)
    }

    /// Resolve `name` as seen from `package`: absolute when it starts with
    /// `.`, otherwise searched in `package` and then every enclosing package.
    pub fn lookup_from(&self, package: PackageId, name: &str) -> Option<&'a DescriptorProto> {
        if name.starts_with('.') {
            return self.lookup_absolute(name);
        }
        let mut scope = Some(package);
        while let Some(current) = scope {
            if let Some(found) = self.relatively_lookup(current, name) {
                return Some(found);
            }
            scope = self.parent(current);
        }
        None
    }

    /// Resolve a dotted `name` below `package` without searching outwards.
    ///
    /// For a compound name, the child-package reading of the leading segment
    /// is tried before the message reading.
    pub fn relatively_lookup(&self, package: PackageId, name: &str) -> Option<&'a DescriptorProto> {
        let pkg = self.package(package);
        let Some((head, rest)) = name.split_once('.') else {
            return pkg.types.get(name).copied();
        };
        debug!(name = rest, scope = head, package = %pkg.name, "looking up compound type name");

        let via_package = pkg
            .children
            .get(head)
            .and_then(|child| self.relatively_lookup(*child, rest));
        if via_package.is_some() {
            return via_package;
        }
        match pkg.types.get(head).copied() {
            Some(message) => lookup_nested_type(message, rest),
            None => {
                debug!(scope = head, package = %pkg.name, "no such package nor message");
                None
            }
        }
    }

    /// Walk child packages from the root along the dotted `name`.
    ///
    /// The empty name (and a lone `.`) denote the root package itself.
    pub fn lookup_package(&self, name: &str) -> Option<PackageId> {
        let name = name.strip_prefix('.').unwrap_or(name);
        if name.is_empty() {
            return Some(Self::ROOT);
        }
        name.split('.').try_fold(Self::ROOT, |current, segment| {
            self.package(current).children.get(segment).copied()
        })
    }
}

/// Follow `name` through the nested types of `message`, one component at a
/// time.
fn lookup_nested_type<'a>(message: &'a DescriptorProto, name: &str) -> Option<&'a DescriptorProto> {
    let mut current = message;
    for component in name.split('.') {
        match current.nested_type.iter().find(|n| n.name() == component) {
            Some(nested) => current = nested,
            None => {
                debug!(
                    component,
                    message = current.name(),
                    "no such nested message"
                );
                return None;
            }
        }
    }
    Some(current)
}
