// Résumé screening: the upload/CRUD surface around the analysis core.
// Handlers own the temporary file lifecycle and persist analysis outcomes.

pub mod handlers;
pub mod store;
