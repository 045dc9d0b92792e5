//! Catalog query service: turns a browse filter into one rendered page of
//! products.

use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::category::Category;
use crate::domain::filter::Filter;
use crate::domain::product::ProductSummary;
use crate::domain::settings::BrowseConfig;
use crate::domain::types::PageSize;
use crate::dto::browse::{
    ALL_TAB_ID, BROWSE_ENDPOINT, BrowseBootstrap, BrowseDebug, CategoryTab, LOAD_PRODUCTS_ACTION,
};
use crate::forms::browse::{BrowseForm, BrowseInput};
use crate::pagination::PageResult;
use crate::repository::{
    CategoryListQuery, CategoryReader, ProductFilter, ProductListQuery, ProductReader,
    SettingsReader,
};
use crate::security::AntiForgery;
use crate::services::settings::load_browse_config;
use crate::services::{ServiceError, ServiceResult};

pub const FRAGMENT_TEMPLATE: &str = "browse/fragment.html";
/// Placeholder for an empty result of an asynchronous browse request.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";
/// Placeholder for an empty catalog on the initial render.
pub const INITIAL_NO_PRODUCTS_MESSAGE: &str = "No products found. Please add some products.";
pub const ALL_TAB_NAME: &str = "All Products";

/// One resolved browse request: the effective filter, the page of products
/// and its rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    pub filter: Filter,
    pub result: PageResult<ProductSummary>,
    pub fragment: String,
}

impl ResolvedPage {
    pub fn debug(&self) -> BrowseDebug {
        BrowseDebug {
            category: self.filter.category.to_string(),
            search: self.filter.search.to_string(),
            page: self.filter.page.get(),
            page_size: u32::try_from(self.result.page_size).unwrap_or(u32::MAX),
            total_count: self.result.total_count,
            total_pages: self.result.total_pages,
        }
    }
}

/// Everything the initial page render needs.
#[derive(Debug, Clone)]
pub struct BrowsePageData {
    pub config: BrowseConfig,
    pub categories: Vec<Category>,
    pub bootstrap: BrowseBootstrap,
    pub initial: ResolvedPage,
}

#[derive(Serialize)]
struct FragmentContext<'a> {
    result: &'a PageResult<ProductSummary>,
    has_pagination: bool,
    empty_message: &'a str,
}

/// Renders the product grid, pagination controls and `empty_message` when
/// there are no items.
pub fn render_fragment(
    tera: &Tera,
    result: &PageResult<ProductSummary>,
    empty_message: &str,
) -> ServiceResult<String> {
    let context = Context::from_serialize(FragmentContext {
        result,
        has_pagination: result.has_pagination(),
        empty_message,
    })?;

    tera.render(FRAGMENT_TEMPLATE, &context).map_err(|err| {
        log::error!("Failed to render product fragment: {err}");
        ServiceError::from(err)
    })
}

/// Fetches one page for `filter` and renders it.
///
/// The item slice and the total count are two independent repository reads;
/// a product published between them may leave the page count off by one,
/// which is accepted.
pub fn resolve_filter<R>(
    repo: &R,
    tera: &Tera,
    filter: &Filter,
    page_size: PageSize,
    empty_message: &str,
) -> ServiceResult<ResolvedPage>
where
    R: ProductReader + ?Sized,
{
    let restrictions = ProductFilter::from(filter);

    let items = repo
        .list_products(ProductListQuery::new(restrictions.clone()).paginate(filter.page, page_size))
        .inspect_err(|err| {
            log::error!("Failed to list products for {filter:?}: {err}");
        })?;

    let total = repo.count_products(restrictions).inspect_err(|err| {
        log::error!("Failed to count products for {filter:?}: {err}");
    })?;

    let result = PageResult::new(items, total, filter.page, page_size);
    let fragment = render_fragment(tera, &result, empty_message)?;

    Ok(ResolvedPage {
        filter: filter.clone(),
        result,
        fragment,
    })
}

/// Handles one browse request end to end.
///
/// The anti-forgery token is checked before anything touches the
/// repository. Cosmetic input problems are coerced by [`BrowseInput`]; only
/// an unknown `action` is rejected as a form error.
pub fn resolve<R>(
    repo: &R,
    tera: &Tera,
    guard: &AntiForgery,
    session_id: Option<&str>,
    form: BrowseForm,
) -> ServiceResult<ResolvedPage>
where
    R: ProductReader + SettingsReader + ?Sized,
{
    let input = BrowseInput::try_from(form).map_err(|err| {
        log::warn!("Rejected browse request: {err}");
        ServiceError::from(err)
    })?;

    guard
        .verify(&input.token, session_id)
        .map_err(|err| {
            log::warn!("Rejected browse request: {err}");
            ServiceError::Unauthorized
        })?;

    let config = load_browse_config(repo)?;
    let page_size = input.page_size.unwrap_or(config.page_size);

    resolve_filter(repo, tera, &input.filter, page_size, NO_PRODUCTS_MESSAGE)
}

/// Builds the category tabs: `all` first, then the listed categories.
pub fn category_tabs(categories: &[Category]) -> Vec<CategoryTab> {
    std::iter::once(CategoryTab {
        id: ALL_TAB_ID.to_string(),
        name: ALL_TAB_NAME.to_string(),
    })
    .chain(categories.iter().map(|category| CategoryTab {
        id: category.slug.to_string(),
        name: category.name.clone(),
    }))
    .collect()
}

/// Loads what the initial render needs: settings, category tabs, a fresh
/// anti-forgery token for `session_id` and the first page of every product.
pub fn load_browse_page<R>(
    repo: &R,
    tera: &Tera,
    guard: &AntiForgery,
    session_id: &str,
) -> ServiceResult<BrowsePageData>
where
    R: ProductReader + CategoryReader + SettingsReader + ?Sized,
{
    let config = load_browse_config(repo)?;

    let categories = repo
        .list_categories(
            CategoryListQuery::new()
                .slugs(config.allowed_categories.iter().cloned())
                .limit(config.category_limit),
        )
        .map_err(|err| {
            log::error!("Failed to load product categories: {err}");
            ServiceError::CategoriesUnavailable(err)
        })?;

    let token = guard.issue(session_id).map_err(|err| {
        log::error!("Failed to issue anti-forgery token: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    let initial = resolve_filter(
        repo,
        tera,
        &Filter::default(),
        config.page_size,
        INITIAL_NO_PRODUCTS_MESSAGE,
    )?;

    let bootstrap = BrowseBootstrap {
        endpoint: BROWSE_ENDPOINT.to_string(),
        action: LOAD_PRODUCTS_ACTION.to_string(),
        token,
        page_size: config.page_size.get(),
        search_enabled: config.search_enabled,
        tabs: category_tabs(&categories),
    };

    Ok(BrowsePageData {
        config,
        categories,
        bootstrap,
        initial,
    })
}
