pub mod widget;

pub use widget::{CarouselWidget, CarouselWidgetConfig};

pub trait UiCarouselExt {
    fn carousel(&mut self, carousel: &mut CarouselWidget) -> egui::Response;
}

impl UiCarouselExt for egui::Ui {
    fn carousel(&mut self, carousel: &mut CarouselWidget) -> egui::Response {
        self.add(carousel)
    }
}
