//! Protected layout: sidebar, header, bottom navigation and the mobile
//! drawer around the routed screen.

use std::collections::BTreeMap;

use iced::widget::{
    Column, Space, Stack, button, column, container, horizontal_space, mouse_area, scrollable,
};
use iced::{Alignment, Background, Border, Color, Element, Length, Padding, Theme};

use fitcoach_core::Language;
use fitcoach_router::Screen;

use super::label;
use crate::app::{App, Message};
use crate::theme::Palette;

pub const SIDEBAR_WIDTH: f32 = 240.0;

/// Destinations in the bottom navigation bar.
const BOTTOM_NAV: [(Screen, &str); 5] = [
    (Screen::Dashboard, "/"),
    (Screen::PlanCreator, "/plan"),
    (Screen::AiCoach, "/ai-coach"),
    (Screen::Forum, "/forum"),
    (Screen::Profile, "/profile"),
];

fn nav_button_style(
    palette: Palette,
    active: bool,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_, status| {
        let bg = match (active, status) {
            (true, _) => palette.primary_dark,
            (false, button::Status::Hovered) => palette.section_background,
            _ => Color::TRANSPARENT,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: if active { Color::WHITE } else { palette.section_text },
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl App {
    pub fn view_protected<'a>(
        &'a self,
        screen: Screen,
        params: &'a BTreeMap<String, String>,
        palette: Palette,
    ) -> Element<'a, Message> {
        let compact = self.is_compact();

        let mut main = Column::new()
            .push(self.view_header(screen, palette))
            .push(
                scrollable(
                    container(self.view_screen(screen, params, palette))
                        .padding(24)
                        .width(Length::Fill),
                )
                .height(Length::Fill),
            );
        if compact {
            main = main.push(self.view_bottom_nav(screen, palette));
        }

        let mut parts: Vec<Element<'a, Message>> = Vec::new();
        if !compact {
            parts.push(self.view_sidebar(screen, palette));
        }
        parts.push(main.width(Length::Fill).height(Length::Fill).into());

        let mut layers: Vec<Element<'a, Message>> = vec![
            self.directed(parts)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        ];

        if compact && self.mobile_sidebar_open {
            layers.push(
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .style(|_| container::Style {
                            background: Some(Background::Color(Color::from_rgba(
                                0.0, 0.0, 0.0, 0.5,
                            ))),
                            ..Default::default()
                        }),
                )
                .on_press(Message::CloseMobileSidebar)
                .into(),
            );
            // The drawer opens from the reading start edge.
            layers.push(
                container(self.view_sidebar(screen, palette))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(self.start_alignment())
                    .into(),
            );
        }

        layers.push(self.view_inbox(palette));
        if self.session.is_new_user() {
            layers.push(self.view_onboarding(palette));
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_sidebar(&self, active: Screen, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();

        let items = self
            .navigator
            .table()
            .navigation(&self.session)
            .map(|(screen, path)| {
                button(label(screen.title(language)).size(14))
                    .width(Length::Fill)
                    .padding(Padding::from([8, 12]))
                    .style(nav_button_style(palette, screen == active))
                    .on_press(Message::Navigate(path.to_string()))
                    .into()
            });

        let user_name = self
            .session
            .user
            .as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_default();

        let content = column![
            label("FitCoach").size(20).color(palette.primary),
            label(user_name).size(12).color(palette.muted),
            Space::with_height(12),
            scrollable(Column::with_children(items).spacing(2)).height(Length::Fill),
            button(label(language.pick("Sign out", "تسجيل الخروج")).size(13))
                .width(Length::Fill)
                .padding(Padding::from([8, 12]))
                .style(nav_button_style(palette, false))
                .on_press(Message::SignOut),
        ]
        .spacing(4)
        .align_x(self.start_alignment());

        container(content)
            .padding(16)
            .width(Length::Fixed(SIDEBAR_WIDTH))
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.section_background)),
                text_color: Some(palette.section_text),
                border: Border {
                    color: palette.primary_dark,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_header(&self, screen: Screen, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        let mut items: Vec<Element<'_, Message>> = Vec::new();

        if self.is_compact() {
            items.push(
                button(label("☰").size(16))
                    .padding(Padding::from([4, 10]))
                    .style(nav_button_style(palette, self.mobile_sidebar_open))
                    .on_press(Message::ToggleMobileSidebar)
                    .into(),
            );
        }

        items.push(label(screen.title(language)).size(18).into());
        items.push(horizontal_space().into());

        if self.session.is_coach {
            let edit = language.pick("Edit", "تحرير");
            items.push(
                button(label(edit).size(13))
                    .padding(Padding::from([4, 10]))
                    .style(nav_button_style(palette, self.edit_mode))
                    .on_press(Message::ToggleEditMode)
                    .into(),
            );
        }

        let switch_to = match language {
            Language::Ar => "English",
            Language::En => "العربية",
        };
        items.push(
            button(label(switch_to).size(13))
                .padding(Padding::from([4, 10]))
                .style(nav_button_style(palette, false))
                .on_press(Message::ToggleLanguage)
                .into(),
        );

        container(self.directed(items).spacing(8).align_y(Alignment::Center))
            .padding(Padding::from([10, 16]))
            .width(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.post_background)),
                text_color: Some(palette.post_text),
                ..Default::default()
            })
            .into()
    }

    fn view_bottom_nav(&self, active: Screen, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        let items = BOTTOM_NAV
            .iter()
            .map(|(screen, path)| {
                button(
                    container(label(screen.title(language)).size(11))
                        .center_x(Length::Fill),
                )
                .width(Length::Fill)
                .padding(Padding::from([8, 4]))
                .style(nav_button_style(palette, *screen == active))
                .on_press(Message::Navigate(path.to_string()))
                .into()
            })
            .collect();

        container(self.directed(items).spacing(4))
            .padding(6)
            .width(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.section_background)),
                ..Default::default()
            })
            .into()
    }
}
