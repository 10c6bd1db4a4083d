//! Interned symbol tables.
//!
//! Three independent tables canonicalize identifier text, integer-literal
//! text and string-literal text. Interning the same text twice on the same
//! table yields the same [`Symbol`]; downstream code compares symbols by
//! identity only.
//!
//! Each table kind is a distinct type parameter, so a `Symbol<Ident>` can
//! never be compared against a `Symbol<StrLit>`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Well-known identifier text used across the pipeline.
pub mod names {
    /// Root of the class hierarchy; the parent of classes without `inherits`.
    pub const OBJECT: &str = "Object";
    /// Wire sentinel for an expression whose type has not been inferred.
    pub const NO_TYPE: &str = "_no_type";
    /// Self type name.
    pub const SELF_TYPE: &str = "SELF_TYPE";
}

/// Default truncation limit for recorded entry lengths.
pub const MAX_SYMBOL_LEN: usize = 1_000_000;

/// Marker for one of the three symbol tables.
pub trait TableKind: 'static {
    /// Human-readable table name for diagnostics.
    const NAME: &'static str;
}

/// Identifiers and type names.
#[derive(Debug)]
pub enum Ident {}

/// Integer literal text.
#[derive(Debug)]
pub enum IntLit {}

/// String literal contents (already unescaped).
///
/// Entries are byte strings: octal escapes can produce bytes that are not
/// UTF-8. See [`SymbolTable::intern_bytes`].
#[derive(Debug)]
pub enum StrLit {}

impl TableKind for Ident {
    const NAME: &'static str = "identifier";
}

impl TableKind for IntLit {
    const NAME: &'static str = "integer";
}

impl TableKind for StrLit {
    const NAME: &'static str = "string";
}

/// Handle to an interned entry of table `K`.
///
/// The handle is the entry's assignment-order index. Equality is identity:
/// two handles from the same table are equal iff they name the same entry.
#[repr(transparent)]
pub struct Symbol<K> {
    index: u32,
    _kind: PhantomData<fn() -> K>,
}

pub type IdSymbol = Symbol<Ident>;
pub type IntSymbol = Symbol<IntLit>;
pub type StrSymbol = Symbol<StrLit>;

impl<K> Symbol<K> {
    #[inline]
    const fn from_index(index: u32) -> Self {
        Symbol {
            index,
            _kind: PhantomData,
        }
    }

    /// Assignment-order index within the owning table.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

// Manual impls: deriving would put bounds on the uninhabited marker types.
impl<K> Copy for Symbol<K> {}

impl<K> Clone for Symbol<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> PartialEq for Symbol<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<K> Eq for Symbol<K> {}

impl<K> PartialOrd for Symbol<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Symbol<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<K> Hash for Symbol<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<K: TableKind> fmt::Debug for Symbol<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}#{})", K::NAME, self.index)
    }
}

/// Immutable view of one interned entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Entry {
    bytes: &'static [u8],
    text: &'static str,
    len: usize,
    index: u32,
}

impl Entry {
    /// Canonical text. Bytes that are not UTF-8 show as U+FFFD.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Exact interned bytes.
    pub fn bytes(&self) -> &'static [u8] {
        self.bytes
    }

    /// Text length, truncated to the limit given at interning time.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.text, self.len, self.index)
    }
}

/// Errors from symbol table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    /// Text expected to be interned was never interned.
    #[error("{table} table has no entry for {text:?}")]
    UnknownText { table: &'static str, text: String },
    /// No entry carries this index.
    #[error("{table} table has no entry with index {index} (table holds {len})")]
    UnknownIndex {
        table: &'static str,
        index: u32,
        len: usize,
    },
    /// More than `u32::MAX` entries.
    #[error("{table} table exceeded capacity of {max} entries", max = u32::MAX)]
    Overflow { table: &'static str },
}

struct TableData {
    /// Map from content to entry index.
    map: FxHashMap<&'static [u8], u32>,
    /// Entries in assignment order; `entries[i].index == i`.
    entries: Vec<Entry>,
}

/// One interning table.
///
/// Lookup and insertion are O(1). Interned text is leaked and lives for
/// the rest of the process, matching the lifetime of a compilation unit.
pub struct SymbolTable<K> {
    data: RwLock<TableData>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TableKind> SymbolTable<K> {
    pub fn new() -> Self {
        SymbolTable {
            data: RwLock::new(TableData {
                map: FxHashMap::default(),
                entries: Vec::with_capacity(64),
            }),
            _kind: PhantomData,
        }
    }

    /// Intern `text`, recording its length truncated to `max_chars`.
    pub fn try_intern_truncated(
        &self,
        text: &str,
        max_chars: usize,
    ) -> Result<Symbol<K>, SymbolError> {
        self.insert(text.as_bytes(), max_chars)
    }

    fn insert(&self, bytes: &[u8], max_chars: usize) -> Result<Symbol<K>, SymbolError> {
        // Fast path: already interned
        if let Some(&index) = self.data.read().map.get(bytes) {
            return Ok(Symbol::from_index(index));
        }

        let mut guard = self.data.write();

        // Double-check after acquiring write lock
        if let Some(&index) = guard.map.get(bytes) {
            return Ok(Symbol::from_index(index));
        }

        let index =
            u32::try_from(guard.entries.len()).map_err(|_| SymbolError::Overflow { table: K::NAME })?;
        let leaked: &'static [u8] = Box::leak(bytes.to_vec().into_boxed_slice());
        let text: &'static str = match std::str::from_utf8(leaked) {
            Ok(text) => text,
            Err(_) => Box::leak(String::from_utf8_lossy(leaked).into_owned().into_boxed_str()),
        };
        guard.entries.push(Entry {
            bytes: leaked,
            text,
            len: leaked.len().min(max_chars),
            index,
        });
        guard.map.insert(leaked, index);

        Ok(Symbol::from_index(index))
    }

    /// Intern `text`, recording its length truncated to `max_chars`.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` entries.
    pub fn intern_truncated(&self, text: &str, max_chars: usize) -> Symbol<K> {
        self.try_intern_truncated(text, max_chars)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Find or create the entry for `text`.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` entries.
    #[inline]
    pub fn intern(&self, text: &str) -> Symbol<K> {
        self.intern_truncated(text, MAX_SYMBOL_LEN)
    }

    /// Intern the decimal text of `value`.
    pub fn intern_int(&self, value: i64) -> Symbol<K> {
        self.intern(&value.to_string())
    }

    /// Find the entry for text the caller knows was interned.
    pub fn lookup_by_text(&self, text: &str) -> Result<Symbol<K>, SymbolError> {
        self.data
            .read()
            .map
            .get(text.as_bytes())
            .map(|&index| Symbol::from_index(index))
            .ok_or_else(|| SymbolError::UnknownText {
                table: K::NAME,
                text: text.to_owned(),
            })
    }

    /// Find the entry with assignment-order index `index`.
    pub fn lookup_by_index(&self, index: u32) -> Result<Symbol<K>, SymbolError> {
        let len = self.len();
        if (index as usize) < len {
            Ok(Symbol::from_index(index))
        } else {
            Err(SymbolError::UnknownIndex {
                table: K::NAME,
                index,
                len,
            })
        }
    }

    /// Text of an interned symbol.
    ///
    /// `sym` must come from this table. A handle from another table of the
    /// same kind resolves to whatever entry shares its index.
    ///
    /// # Panics
    /// Panics if no entry carries the handle's index.
    pub fn resolve(&self, sym: Symbol<K>) -> &'static str {
        self.entry(sym).text
    }

    /// Full entry of an interned symbol. Same precondition as [`resolve`].
    ///
    /// [`resolve`]: SymbolTable::resolve
    pub fn entry(&self, sym: Symbol<K>) -> Entry {
        self.data.read().entries[sym.index as usize]
    }

    /// Checked [`resolve`](SymbolTable::resolve).
    pub fn try_resolve(&self, sym: Symbol<K>) -> Result<&'static str, SymbolError> {
        self.try_entry(sym).map(|entry| entry.text)
    }

    /// Checked [`entry`](SymbolTable::entry).
    pub fn try_entry(&self, sym: Symbol<K>) -> Result<Entry, SymbolError> {
        let data = self.data.read();
        data.entries
            .get(sym.index as usize)
            .copied()
            .ok_or(SymbolError::UnknownIndex {
                table: K::NAME,
                index: sym.index,
                len: data.entries.len(),
            })
    }

    /// Snapshot of every entry in index order.
    pub fn entries(&self) -> Vec<Entry> {
        self.data.read().entries.clone()
    }

    /// Entries in index order, over a snapshot taken at call time.
    pub fn iter(&self) -> std::vec::IntoIter<Entry> {
        self.entries().into_iter()
    }

    pub fn len(&self) -> usize {
        self.data.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SymbolTable<StrLit> {
    /// Find or create the entry for a byte string, UTF-8 or not.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` entries.
    pub fn intern_bytes(&self, bytes: &[u8]) -> StrSymbol {
        self.insert(bytes, MAX_SYMBOL_LEN)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Exact bytes of an interned string literal.
    pub fn resolve_bytes(&self, sym: StrSymbol) -> &'static [u8] {
        self.entry(sym).bytes
    }
}

impl<K: TableKind> Default for SymbolTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKind> fmt::Debug for SymbolTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("kind", &K::NAME)
            .field("len", &self.len())
            .finish()
    }
}

/// The three tables of one compilation unit.
///
/// Passed by reference into every codec and token-stream call.
#[derive(Debug, Default)]
pub struct SymbolTables {
    pub idents: SymbolTable<Ident>,
    pub ints: SymbolTable<IntLit>,
    pub strings: SymbolTable<StrLit>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `Object` class name.
    pub fn object(&self) -> IdSymbol {
        self.idents.intern(names::OBJECT)
    }
}
