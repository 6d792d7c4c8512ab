use shared::domain::City;

/// One row of the numbered itinerary list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRow {
    pub ordinal: usize,
    pub city: City,
    pub dragging: bool,
}

impl SelectedRow {
    pub fn label(&self) -> String {
        format!("{}. {}", self.ordinal, self.city.name)
    }
}

pub fn selected_rows(cities: &[City], dragging: Option<usize>) -> Vec<SelectedRow> {
    cities
        .iter()
        .enumerate()
        .map(|(index, city)| SelectedRow {
            ordinal: index + 1,
            city: city.clone(),
            dragging: dragging == Some(index),
        })
        .collect()
}

/// Projects planner state onto a view. Implementations only draw.
pub trait RenderAdapter {
    fn render_available(&mut self, cities: &[City]);
    fn render_selected(&mut self, rows: &[SelectedRow]);
    fn render_drag_indicator(&mut self, _dragging: Option<usize>) {}
}

pub struct NoopRenderer;

impl RenderAdapter for NoopRenderer {
    fn render_available(&mut self, _cities: &[City]) {}
    fn render_selected(&mut self, _rows: &[SelectedRow]) {}
}
