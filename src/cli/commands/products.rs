use anyhow::{anyhow, Result};

use super::{invalid, prompt, stdin_lines};
use crate::api::{Product, ProductFilter};
use crate::cli::{ProductFields, Session};
use crate::forms::ProductForm;
use crate::router::Route;
use crate::store::products::{selectors, ProductsIntent};
use crate::views::{self, ListController};

pub async fn list(
    session: &mut Session,
    page: Option<u32>,
    limit: Option<u32>,
    category: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let filter = ProductFilter {
        page: page.unwrap_or(1),
        limit: limit.unwrap_or(session.config().catalog.page_size),
        category,
        search,
    }
    .normalized();
    let route = session.guard(&Route::ProductList(filter).path())?;
    show_route(session, route).await
}

pub async fn show(session: &mut Session, id: &str) -> Result<()> {
    session.guard(&Route::ProductDetail(id.to_string()).path())?;
    let product = load(session, id).await?;
    println!("{}", views::product_detail(&product));
    Ok(())
}

pub async fn categories(session: &mut Session) -> Result<()> {
    session.guard(&Route::NewProduct.path())?;
    session.store().dispatch(ProductsIntent::LoadCategories);
    session.settle().await.report()?;
    let categories = session
        .store()
        .select(|state| selectors::categories(state).to_vec());
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

pub async fn create(session: &mut Session, fields: ProductFields) -> Result<()> {
    session.guard(&Route::NewProduct.path())?;
    let form = apply(ProductForm::default(), fields);
    let product = match form.to_new_product() {
        Ok(product) => product,
        Err(errors) => return invalid(errors),
    };

    session.store().dispatch(ProductsIntent::CreateProduct { product });
    session.settle().await.report()?;
    if let Some(created) = session
        .store()
        .select(|state| selectors::products(state).first().cloned())
    {
        println!("{}", views::product_card(&created));
    }
    Ok(())
}

pub async fn update(session: &mut Session, id: &str, fields: ProductFields) -> Result<()> {
    session.guard(&Route::EditProduct(id.to_string()).path())?;
    let current = load(session, id).await?;
    let form = apply(ProductForm::from_product(&current), fields);
    let patch = match form.to_patch() {
        Ok(patch) => patch,
        Err(errors) => return invalid(errors),
    };

    session.store().dispatch(ProductsIntent::UpdateProduct {
        id: id.to_string(),
        patch,
    });
    session.settle().await.report()?;
    if let Some(updated) = session
        .store()
        .select(|state| selectors::selected_product(state).cloned())
    {
        println!("{}", views::product_detail(&updated));
    }
    Ok(())
}

pub async fn delete(session: &mut Session, id: &str, yes: bool) -> Result<()> {
    session.guard(&Route::ProductDetail(id.to_string()).path())?;
    let product = load(session, id).await?;

    let answer = if yes {
        None
    } else {
        let dialog = views::ConfirmDialog::delete_product(&product);
        prompt(&mut stdin_lines(), &format!("{} ", dialog.prompt())).await?
    };

    let controller = ListController::new(session.store().clone());
    let dispatched = controller.delete(&product, |dialog| {
        yes || answer.as_deref().is_some_and(|a| dialog.accepts(a))
    });
    if !dispatched {
        println!("Cancelled");
        return Ok(());
    }
    session.settle().await.report()
}

/// Resolve `target` through the guard and render the screen it names.
pub async fn open(session: &mut Session, target: &str) -> Result<()> {
    let route = session.guard(target)?;
    println!("{route}");
    show_route(session, route).await
}

pub(super) async fn show_route(session: &mut Session, route: Route) -> Result<()> {
    match route {
        Route::ProductList(_) => {
            ListController::new(session.store().clone()).open(&route);
            print_list(session).await?;
        }
        Route::ProductDetail(id) => {
            let product = load(session, &id).await?;
            println!("{}", views::product_detail(&product));
        }
        Route::EditProduct(id) => {
            let product = load(session, &id).await?;
            println!("Editing: {}", ProductForm::from_product(&product));
        }
        Route::NewProduct => {
            session.store().dispatch(ProductsIntent::LoadCategories);
            session.settle().await.report()?;
            let categories = session
                .store()
                .select(|state| selectors::categories(state).join(", "));
            println!("New product. Categories: {categories}");
        }
        Route::Login => println!("Sign in with `catalog login`"),
        Route::Register => println!("Create an account with `catalog register`"),
    }
    Ok(())
}

/// Wait for the pending list fetch and print the page.
pub(super) async fn print_list(session: &mut Session) -> Result<()> {
    session.settle().await.report()?;
    let text = session
        .store()
        .select(|state| views::product_list(selectors::products_state(state)));
    println!("{text}");
    Ok(())
}

/// Fetch one product into the selection and return it.
pub(super) async fn load(session: &mut Session, id: &str) -> Result<Product> {
    session.store().dispatch(ProductsIntent::LoadProduct { id: id.to_string() });
    session.settle().await.report()?;
    session
        .store()
        .select(|state| selectors::selected_product(state).cloned())
        .ok_or_else(|| anyhow!("Product {id} not found"))
}

fn apply(mut form: ProductForm, fields: ProductFields) -> ProductForm {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(price) = fields.price {
        form.price = price;
    }
    if let Some(category) = fields.category {
        form.select_category(category);
    }
    if let Some(new_category) = fields.new_category {
        form.new_category = new_category;
    }
    form
}
