//! The editor window: a thin consumer of the [`Session`] API.

use std::path::PathBuf;

use image::{imageops, Rgba, RgbaImage};
use vwf_engine::{render_glyph, Field, Session, FIELD_COUNT};

const PREVIEW_SIZE: u32 = 64;
const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([128, 0, 0, 255]);

pub struct EditApp {
    session: Session,
    atlas: RgbaImage,
    output_path: PathBuf,

    selected: usize,
    field_inputs: [String; FIELD_COUNT],
    search: String,
    status: String,
    preview: Option<egui::TextureHandle>,
}

impl EditApp {
    pub fn new(session: Session, atlas: RgbaImage, output_path: PathBuf) -> Self {
        let mut app = Self {
            session,
            atlas,
            output_path,
            selected: 0,
            field_inputs: std::array::from_fn(|_| String::new()),
            search: String::new(),
            status: "Ready".to_string(),
            preview: None,
        };
        app.load_entry();
        app
    }

    /// Copy the selected record's fields into the text inputs.
    fn load_entry(&mut self) {
        if let Ok(record) = self.session.get(self.selected) {
            for (input, field) in self.field_inputs.iter_mut().zip(Field::ALL) {
                *input = record.value(field).to_string();
            }
        }
        self.preview = None;
    }

    /// Parse the text inputs and commit them to the session.
    fn save_entry(&mut self) {
        let mut values = [0i64; FIELD_COUNT];
        for ((input, field), value) in self.field_inputs.iter().zip(Field::ALL).zip(&mut values) {
            match input.trim().parse::<i64>() {
                Ok(parsed) => *value = parsed,
                Err(_) => {
                    self.status = format!("'{}' is not a number for {}", input.trim(), field.name());
                    return;
                }
            }
        }
        match self.session.update_fields(self.selected, &values) {
            Ok(()) => {
                self.status = format!("Entry {} saved.", self.selected);
                self.preview = None;
            }
            Err(err) => {
                log::warn!("entry {} not saved: {err}", self.selected);
                self.status = format!("Could not save entry: {err}");
            }
        }
    }

    fn save_file(&mut self) {
        match self.session.save(&self.output_path) {
            Ok(()) => self.status = format!("File saved as '{}'", self.output_path.display()),
            Err(err) => {
                log::error!("save failed: {err}");
                self.status = format!("Could not save file: {err}");
            }
        }
    }

    /// Jump to the record mapped to the search term (a literal character or
    /// a `U+XXXX` hex code).
    fn run_search(&mut self) {
        let term = self.search.trim();
        if term.is_empty() {
            return;
        }
        let code = if let Some(hex) = term.strip_prefix("U+").or_else(|| term.strip_prefix("u+")) {
            match u32::from_str_radix(hex, 16) {
                Ok(code) => code,
                Err(_) => {
                    self.status = format!("'{term}' is not a valid Unicode code");
                    return;
                }
            }
        } else {
            // first character of the entered text
            term.chars().next().map_or(0, u32::from)
        };

        match self.session.find_by_code(code) {
            Ok(index) => {
                self.selected = index;
                self.load_entry();
                self.status = format!("U+{code:04X} is record {index}.");
            }
            Err(_) => self.status = format!("Character U+{code:04X} not found in the mapping."),
        }
    }

    /// Glyph preview for the selected record; a solid placeholder stands in
    /// for any record with an unusable rectangle.
    fn ensure_preview(&mut self, ctx: &egui::Context) {
        if self.preview.is_some() {
            return;
        }
        let glyph = match self.session.get(self.selected).and_then(|record| render_glyph(record, &self.atlas)) {
            Ok(glyph) => imageops::resize(&glyph, PREVIEW_SIZE, PREVIEW_SIZE, imageops::FilterType::Nearest),
            Err(err) => {
                log::debug!("preview for record {}: {err}", self.selected);
                RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, PLACEHOLDER_COLOR)
            }
        };
        let color_image = egui::ColorImage::from_rgba_unmultiplied([PREVIEW_SIZE as usize, PREVIEW_SIZE as usize], glyph.as_raw());
        self.preview = Some(ctx.load_texture("glyph_preview", color_image, egui::TextureOptions::NEAREST));
    }
}

impl eframe::App for EditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Index:");
                let max = self.session.record_count().saturating_sub(1);
                let changed = ui.add(egui::DragValue::new(&mut self.selected).clamp_range(0..=max)).changed();
                if changed || ui.button("Load").clicked() {
                    self.load_entry();
                }
                if ui.button("Save entry").clicked() {
                    self.save_entry();
                }
                if ui.button("Save file").clicked() {
                    self.save_file();
                }
            });

            if let Ok(record) = self.session.get(self.selected) {
                let shown = record.ch.map_or_else(|| "?".to_string(), String::from);
                ui.heading(format!("Character: {shown}"));
                ui.label(format!("Offset: 0x{:X}", record.byte_offset));
            }

            ui.horizontal(|ui| {
                ui.label("Find character:");
                let response = ui.add(egui::TextEdit::singleline(&mut self.search).desired_width(80.0));
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Search").clicked() || submitted {
                    self.run_search();
                }
            });

            ui.separator();

            egui::Grid::new("record_fields").num_columns(2).show(ui, |ui| {
                for (input, field) in self.field_inputs.iter_mut().zip(Field::ALL) {
                    ui.label(field.name());
                    ui.text_edit_singleline(input);
                    ui.end_row();
                }
            });

            ui.separator();

            self.ensure_preview(ctx);
            if let Some(texture) = &self.preview {
                ui.image((texture.id(), egui::vec2(PREVIEW_SIZE as f32, PREVIEW_SIZE as f32)));
            }
        });
    }
}
