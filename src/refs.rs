use pdf_writer::Ref;
use std::collections::HashMap;

/// The objects of an exported document that need an id
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    PageImage(usize),
}

/// Object ids, handed out in increasing order and remembered by the object
/// they were handed to
#[derive(Debug)]
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next: Ref,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next: Ref::new(1),
        }
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// The id of an object, allocated the first time it is asked for
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let next = &mut self.next;
        *self.refs.entry(ref_type).or_insert_with(|| {
            let id = *next;
            *next = id.next();
            id
        })
    }
}
