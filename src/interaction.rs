//! Hover behaviour for county paths and the tooltip overlay
//!
//! The same rules run twice: in Rust, where [`Tooltip`] models the overlay
//! state, and in the page script produced by [`hover_script`], which the
//! browser executes. Both share the constants below.

use crate::data::EducationRecord;
use crate::renderer::map::CountyPath;

/// Horizontal distance from the pointer to the tooltip's left edge
pub const TOOLTIP_OFFSET_X: f64 = 20.0;

/// Vertical distance from the pointer to the tooltip's top edge
pub const TOOLTIP_OFFSET_Y: f64 = -30.0;

/// Stroke of a county path
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    /// Thin white outline drawn when the county is not hovered
    pub fn resting() -> Self {
        Self {
            color: "#fff".to_string(),
            width: 0.5,
        }
    }

    /// Outline of the county under the pointer
    pub fn hovered() -> Self {
        Self {
            color: "black".to_string(),
            width: 1.0,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::resting()
    }
}

/// Tooltip markup for a matched county
pub fn tooltip_html(record: &EducationRecord) -> String {
    format!(
        "<strong>{}</strong><br>Bachelor's Degree: {}%<br>State: {}",
        escape_html(&record.area_name),
        record.bachelors_or_higher,
        escape_html(&record.state)
    )
}

/// State of the `#tooltip` overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub html: Option<String>,
    /// Value of the `data-education` attribute
    pub education: Option<f64>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub visible: bool,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer enters a county: load its content, leave the tooltip alone if unmatched
    pub fn pointer_enter(&mut self, county: &CountyPath) {
        if let (Some(html), Some(education)) = (&county.tooltip, county.education) {
            self.html = Some(html.clone());
            self.education = Some(education);
        }
    }

    /// Pointer moves over a county at page coordinates `(page_x, page_y)`
    pub fn pointer_move(&mut self, county: &mut CountyPath, page_x: f64, page_y: f64) {
        self.top = Some(page_y + TOOLTIP_OFFSET_Y);
        self.left = Some(page_x + TOOLTIP_OFFSET_X);
        self.visible = true;
        county.stroke = Stroke::hovered();
    }

    /// Pointer leaves a county
    pub fn pointer_leave(&mut self, county: &mut CountyPath) {
        self.visible = false;
        county.stroke = Stroke::resting();
    }

    /// Inline `style` attribute value, `None` before the first move
    pub fn style(&self) -> Option<String> {
        let display = if self.visible { "block" } else { "none" };
        match (self.top, self.left) {
            (Some(top), Some(left)) => Some(format!(
                "top: {}px; left: {}px; display: {}",
                top, left, display
            )),
            _ if self.visible => Some("display: block".to_string()),
            _ => None,
        }
    }
}

/// Browser-side event wiring for `#map path.county`
///
/// Reads tooltip content from the `#county-data` JSON island keyed by FIPS.
pub fn hover_script() -> String {
    let resting = Stroke::resting();
    let hovered = Stroke::hovered();
    format!(
        r##"(function () {{
  var data = JSON.parse(document.getElementById("county-data").textContent);
  var tooltip = document.getElementById("tooltip");
  document.querySelectorAll("#map path.county").forEach(function (path) {{
    path.addEventListener("mouseover", function () {{
      var county = data[path.getAttribute("data-fips")];
      if (county) {{
        tooltip.setAttribute("data-education", county.education);
        tooltip.innerHTML = county.html;
      }}
    }});
    path.addEventListener("mousemove", function (event) {{
      tooltip.style.top = (event.pageY + ({dy})) + "px";
      tooltip.style.left = (event.pageX + ({dx})) + "px";
      tooltip.style.display = "block";
      path.style.stroke = "{hover_color}";
      path.style.strokeWidth = "{hover_width}px";
    }});
    path.addEventListener("mouseout", function () {{
      tooltip.style.display = "none";
      path.style.stroke = "{rest_color}";
      path.style.strokeWidth = "{rest_width}";
    }});
  }});
}})();"##,
        dy = TOOLTIP_OFFSET_Y,
        dx = TOOLTIP_OFFSET_X,
        hover_color = hovered.color,
        hover_width = hovered.width,
        rest_color = resting.color,
        rest_width = resting.width,
    )
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
