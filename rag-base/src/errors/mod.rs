pub mod rag_base_error;
