pub mod chrome;
pub mod overlays;
pub mod screens;

use iced::alignment::Horizontal;
use iced::widget::{Row, Space, Stack, button, column, container, image, row, text};
use iced::{Background, Border, Color, ContentFit, Element, Length, Padding, Theme};

use fitcoach_router::View;

use crate::app::{App, Message};
use crate::state::SCRIM_OPACITY;
use crate::theme::Palette;

/// Text with shaping that handles Arabic script.
pub fn label<'a>(content: impl text::IntoFragment<'a>) -> text::Text<'a> {
    text(content).shaping(text::Shaping::Advanced)
}

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let palette = Palette::from_styles(self.shell.styles());

        let routed: Element<'_, Message> = match &self.current {
            View::Loading => self.view_loading(palette),
            View::Verification => self.view_verification(palette),
            View::Public { screen, params } => self.view_public(*screen, params, palette),
            View::Protected { screen, params } => self.view_protected(*screen, params, palette),
        };

        let mut body = column![];
        if let Some(message) = self.shell.banner_message() {
            body = body.push(self.view_banner(message, palette));
        }
        if let Some(err) = &self.route_error {
            body = body.push(self.view_route_error(err, palette));
        }
        body = body.push(routed);

        let mut layers: Vec<Element<'_, Message>> = Vec::new();
        if let Some(url) = self.shell.background_url() {
            layers.push(background_layer(url));
        }
        layers.push(body.into());
        if self.edit_mode {
            layers.push(self.view_edit_overlay(palette));
        }

        container(Stack::with_children(layers).width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.background)),
                text_color: Some(palette.text),
                ..Default::default()
            })
            .into()
    }

    /// Lays `items` out left to right, or right to left in Arabic.
    pub fn directed<'a>(&self, mut items: Vec<Element<'a, Message>>) -> Row<'a, Message> {
        if self.shell.document().dir.is_rtl() {
            items.reverse();
        }
        Row::with_children(items)
    }

    /// Horizontal alignment of the document's reading start.
    pub fn start_alignment(&self) -> Horizontal {
        if self.shell.document().dir.is_rtl() {
            Horizontal::Right
        } else {
            Horizontal::Left
        }
    }

    fn view_banner(&self, message: String, palette: Palette) -> Element<'_, Message> {
        let close = button(label("✕").size(12))
            .padding(Padding::from([2, 8]))
            .style(move |_: &Theme, status: button::Status| {
                let bg = match status {
                    button::Status::Hovered => palette.primary_light,
                    _ => palette.primary_dark,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: Color::WHITE,
                    border: Border {
                        radius: 3.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::DismissBanner);

        let content = self
            .directed(vec![
                label(message).size(14).color(Color::WHITE).width(Length::Fill).into(),
                close.into(),
            ])
            .spacing(12)
            .align_y(iced::Alignment::Center);

        container(content)
            .padding(Padding::from([8, 16]))
            .width(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.primary)),
                ..Default::default()
            })
            .into()
    }

    fn view_route_error(&self, err: &str, palette: Palette) -> Element<'_, Message> {
        container(
            row![
                label(err.to_string()).size(12).color(palette.text),
                Space::with_width(Length::Fill),
                button(label("/").size(12)).on_press(Message::Navigate("/".to_string())),
            ]
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::from([6, 16]))
        .width(Length::Fill)
        .style(|_| container::Style {
            background: Some(Background::Color(Color::from_rgb(0.6, 0.15, 0.15))),
            ..Default::default()
        })
        .into()
    }
}

/// Background image with a black scrim over it.
fn background_layer<'a>(url: String) -> Element<'a, Message> {
    let path = url.strip_prefix("file://").unwrap_or(&url).to_string();

    Stack::new()
        .push(
            image(image::Handle::from_path(path))
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(
            container(Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Background::Color(Color::from_rgba(
                        0.0,
                        0.0,
                        0.0,
                        SCRIM_OPACITY,
                    ))),
                    ..Default::default()
                }),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
