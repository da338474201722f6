mod axes_draw;
pub mod warping;

pub(crate) use axes_draw::draw_axes;
