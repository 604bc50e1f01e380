pub mod appwrite;
pub mod document;
pub mod memory;
pub mod paging;

pub use appwrite::AppwriteStore;
pub use document::{
    encode_data, unique_document_id, CollectionRef, Document, DocumentData, DocumentPage,
    DocumentStore, Filter, ListQuery, Order, StoreError, CREATED_AT, DOCUMENT_ID,
};
pub use memory::MemoryStore;
pub use paging::{list_all, list_page_with_retry, ReadPolicy};
