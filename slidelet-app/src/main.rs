use slidelet::{
    ui::{widget::CarouselWidget, UiCarouselExt},
    CarouselOptions, EasingFunction, TransitionMode,
};

/// Standalone carousel playground application
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 520.0])
            .with_title("Slidelet - Carousel Playground"),
        ..Default::default()
    };

    eframe::run_native(
        "slidelet-app",
        options,
        Box::new(|cc| Box::new(SlideletApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start viewer: {}", e))?;

    Ok(())
}

/// The main application struct
struct SlideletApp {
    carousel: CarouselWidget,
    options: CarouselOptions,
    slide_count: usize,
    eased: bool,
    easing: EasingFunction,
    changes: Vec<(usize, usize)>,
    show_state_panel: bool,
}

impl SlideletApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let options = CarouselOptions {
            infinite: true,
            ..Default::default()
        };
        let slide_count = 6;

        Self {
            carousel: CarouselWidget::new(slide_count, options.clone()),
            options,
            slide_count,
            eased: false,
            easing: EasingFunction::default(),
            changes: Vec::new(),
            show_state_panel: true,
        }
    }

    fn rebuild(&mut self) {
        self.options.transition = if self.eased {
            TransitionMode::Eased {
                easing: self.easing,
            }
        } else {
            TransitionMode::Timed
        };

        if let Err(e) = self.options.validate() {
            log::warn!("keeping previous carousel: {}", e);
            return;
        }
        if self.carousel.carousel().slide_count() != self.slide_count {
            self.carousel = CarouselWidget::new(self.slide_count, self.options.clone());
        } else {
            self.carousel.rebuild(self.options.clone());
        }
        self.changes.clear();
    }

    fn options_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Options");
        ui.separator();

        let mut changed = false;
        changed |= ui.checkbox(&mut self.options.infinite, "Infinite").changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.slide_count, 1..=12).text("Slides"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.options.display, 1..=4).text("Display"))
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.options.transition_duration_ms, 0..=2000)
                    .text("Duration (ms)"),
            )
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.options.drag_threshold, 0.0..=200.0).text("Threshold"))
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.options.edge_resistance, 0.0..=1.0)
                    .text("Edge resistance"),
            )
            .changed();

        ui.separator();
        changed |= ui.checkbox(&mut self.eased, "Frame-driven easing").changed();
        ui.add_enabled_ui(self.eased, |ui| {
            egui::ComboBox::from_label("Easing")
                .selected_text(self.easing.name())
                .show_ui(ui, |ui| {
                    for easing in EasingFunction::all() {
                        changed |= ui
                            .selectable_value(&mut self.easing, easing, easing.name())
                            .changed();
                    }
                });
        });

        if changed {
            self.rebuild();
        }
    }

    fn state_panel(&self, ui: &mut egui::Ui) {
        let carousel = self.carousel.carousel();

        ui.heading("State");
        ui.separator();
        ui.label(format!("Current: {}", carousel.current_index()));
        ui.label(format!("Sliding: {}", carousel.is_sliding()));
        ui.label(format!("Dragging: {}", carousel.is_dragging()));
        ui.label(format!("Drag delta: {:.0}px", carousel.drag_delta()));
        ui.label(format!("Offset: {:.1}px", carousel.offset()));
        ui.label(format!("Slide width: {:.0}px", carousel.slide_width()));
        ui.label(format!("Clones per side: {}", carousel.clone_count()));
        if let Some(err) = carousel.init_error() {
            ui.colored_label(egui::Color32::from_rgb(150, 0, 0), err.to_string());
        }

        ui.separator();
        ui.label("Recent changes:");
        for (to, from) in self.changes.iter().rev().take(8) {
            ui.label(format!("{} -> {}", from, to));
        }
    }
}

impl eframe::App for SlideletApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_state_panel, "State Panel");
                });

                ui.separator();
                if ui.button("Prev").clicked() {
                    self.carousel.carousel_mut().prev();
                }
                if ui.button("Next").clicked() {
                    self.carousel.carousel_mut().next();
                }
                let active = self.carousel.carousel().is_active();
                if ui.selectable_label(!active, "Disabled").clicked() {
                    self.carousel.carousel_mut().disable(active);
                }
            });
        });

        egui::SidePanel::left("options_panel")
            .resizable(true)
            .show(ctx, |ui| self.options_panel(ui));

        if self.show_state_panel {
            egui::SidePanel::right("state_panel")
                .resizable(true)
                .show(ctx, |ui| self.state_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let before = self.carousel.carousel().current_index();
            ui.carousel(&mut self.carousel);
            let after = self.carousel.carousel().current_index();
            if before != after {
                self.changes.push((after, before));
            }
        });
    }
}
