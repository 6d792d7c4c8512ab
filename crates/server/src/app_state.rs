use catalog_api::CatalogContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: CatalogContext,
}
