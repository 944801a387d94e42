use std::time::Duration;

use catalog_core::{CatalogConfig, Category, CategoryId, NoticeKind, ProductFields, ProductId};

use crate::state_manager::CatalogStateManager;
use crate::wasm_utils;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum FormAction {
    Save,
    Cancel,
}

/// Clothing catalog: search bar, product table and the add/edit form.
pub struct CatalogApp {
    state: CatalogStateManager,
}

impl CatalogApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CatalogConfig) -> Self {
        wasm_utils::set_panic_hook();
        log::info!("Starting catalog against {}", config.service.base_url);

        let mut state = CatalogStateManager::new(&config);
        state.load_all();

        Self { state }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = wasm_utils::now_timestamp();
        self.state.update_from_async(now);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Clothing Product Management");
                ui.separator();
                if ui.button("🔄 Reload").clicked() {
                    self.state.load_all();
                }
                if self.state.is_loading() {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.state.service_url());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_notice(ui);
                self.render_search_bar(ui);
                ui.add_space(10.0);
                self.render_form(ui);
                self.render_table(ui);
            });
        });

        // Keep polling while requests are out, and wake up for the notice clear.
        if self.state.is_loading() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
        if let Some(due) = self.state.session.notice_clear_due() {
            ctx.request_repaint_after(Duration::from_millis(due.saturating_sub(now)));
        }
    }
}

impl CatalogApp {
    fn render_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.state.session.notice() else {
            return;
        };

        let color = match notice.kind {
            NoticeKind::Success => egui::Color32::from_rgb(60, 170, 90),
            NoticeKind::Error => egui::Color32::from_rgb(220, 80, 80),
        };

        let mut dismissed = false;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(color, &notice.text);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    dismissed = ui.small_button("✖").clicked();
                });
            });
        });
        ui.add_space(6.0);

        if dismissed {
            self.state.dismiss_notice();
        }
    }

    fn render_search_bar(&mut self, ui: &mut egui::Ui) {
        let selected = category_label(
            self.state.store.current_categories(),
            self.state.filter.category.as_ref(),
            "All categories",
        );

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.state.filter.name_query)
                    .hint_text("Search by name..."),
            );

            let categories = self.state.store.current_categories();
            let filter = &mut self.state.filter;
            egui::ComboBox::from_id_salt("category_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut filter.category, None, "All categories");
                    category_options(ui, &mut filter.category, categories);
                });

            let can_add = !self.state.session.is_submitting();
            if ui
                .add_enabled(can_add, egui::Button::new("➕ Add Product"))
                .clicked()
            {
                self.state.add_product();
            }
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let Some(draft) = self.state.session.draft() else {
            return;
        };

        let title = match draft.id() {
            Some(id) => format!("Edit Product #{}", id),
            None => "New Product".to_string(),
        };
        let submitting = self.state.session.is_submitting();
        let mut action = None;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(title);
            ui.separator();

            let categories = self.state.store.current_categories();
            match self.state.session.fields_mut() {
                Some(fields) => product_form(ui, fields, categories),
                None => {
                    // Read-only while the save is in flight.
                    let mut snapshot = self
                        .state
                        .session
                        .draft()
                        .map(|draft| draft.fields().clone())
                        .unwrap_or_default();
                    ui.add_enabled_ui(false, |ui| product_form(ui, &mut snapshot, categories));
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!submitting, egui::Button::new("💾 Save"))
                    .clicked()
                {
                    action = Some(FormAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(FormAction::Cancel);
                }
                if submitting {
                    ui.spinner();
                    ui.label("Saving...");
                }
            });
        });
        ui.add_space(10.0);

        match action {
            Some(FormAction::Save) => self.state.submit(),
            Some(FormAction::Cancel) => self.state.cancel_edit(),
            None => {}
        }
    }

    fn render_table(&mut self, ui: &mut egui::Ui) {
        let rows = self.state.rows();

        if rows.is_empty() {
            let filtered = !self.state.filter.is_empty();
            let mut clear = false;
            ui.vertical_centered(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), "No products found");
                if filtered {
                    clear = ui.button("Clear search").clicked();
                }
            });
            if clear {
                self.state.clear_filter();
            }
            return;
        }

        let editing_locked = self.state.session.is_submitting();
        let mut edit: Option<ProductId> = None;

        egui::Grid::new("product_table")
            .num_columns(6)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in ["Code", "Name", "Import Date", "Quantity", "Category", "Actions"] {
                    ui.strong(header);
                }
                ui.end_row();

                for row in &rows {
                    ui.label(&row.product.code);
                    ui.label(&row.product.name);
                    ui.label(&row.product.import_date);
                    ui.label(row.product.quantity.to_string());
                    ui.label(row.category);
                    if ui
                        .add_enabled(!editing_locked, egui::Button::new("✏ Edit"))
                        .clicked()
                    {
                        edit = Some(row.product.id.clone());
                    }
                    ui.end_row();
                }
            });

        if let Some(id) = edit {
            self.state.edit_product(&id);
        }
    }
}

fn product_form(ui: &mut egui::Ui, fields: &mut ProductFields, categories: &[Category]) {
    egui::Grid::new("product_form")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("Product Code:");
            ui.text_edit_singleline(&mut fields.code);
            ui.end_row();

            ui.label("Product Name:");
            ui.add(egui::TextEdit::singleline(&mut fields.name).char_limit(100));
            ui.end_row();

            ui.label("Import Date (DD/MM/YYYY):");
            ui.add(egui::TextEdit::singleline(&mut fields.import_date).hint_text("DD/MM/YYYY"));
            ui.end_row();

            ui.label("Quantity:");
            ui.text_edit_singleline(&mut fields.quantity);
            ui.end_row();

            ui.label("Category:");
            let selected =
                category_label(categories, fields.category_id.as_ref(), "Select a category");
            egui::ComboBox::from_id_salt("draft_category")
                .selected_text(selected)
                .show_ui(ui, |ui| category_options(ui, &mut fields.category_id, categories));
            ui.end_row();
        });
}

fn category_options(
    ui: &mut egui::Ui,
    selection: &mut Option<CategoryId>,
    categories: &[Category],
) {
    if categories.is_empty() {
        ui.weak("No categories available");
        return;
    }
    for category in categories {
        ui.selectable_value(selection, Some(category.id.clone()), &category.name);
    }
}

fn category_label(
    categories: &[Category],
    selected: Option<&CategoryId>,
    placeholder: &str,
) -> String {
    match selected {
        None => placeholder.to_string(),
        Some(id) => categories
            .iter()
            .find(|category| &category.id == id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| catalog_core::UNKNOWN_CATEGORY.to_string()),
    }
}
