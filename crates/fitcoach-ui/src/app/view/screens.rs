//! Screen bodies. The feature screens live outside the shell, so each is a
//! card naming the screen and the parameters it was opened with.

use std::collections::BTreeMap;

use iced::widget::{Column, Space, Stack, button, column, container};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use fitcoach_router::Screen;

use super::label;
use crate::app::{App, Message};
use crate::theme::Palette;

fn primary_button_style(palette: Palette) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_, status| {
        let bg = match status {
            button::Status::Hovered => palette.primary_light,
            button::Status::Pressed => palette.primary_dark,
            _ => palette.primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn card<'a>(content: impl Into<Element<'a, Message>>, palette: Palette) -> Element<'a, Message> {
    container(content)
        .padding(24)
        .max_width(640.0)
        .style(move |_| container::Style {
            background: Some(Background::Color(palette.post_background)),
            text_color: Some(palette.post_text),
            border: Border {
                color: palette.primary_dark,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}

impl App {
    pub fn view_loading(&self, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        container(label(language.pick("Loading…", "جار التحميل…")).size(18).color(palette.primary))
            .center(Length::Fill)
            .into()
    }

    pub fn view_verification(&self, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        let email = self
            .session
            .user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default();

        let content = column![
            label(language.pick("Verify your email", "تحقق من بريدك الإلكتروني")).size(22),
            label(language.pick(
                "We sent a confirmation link to",
                "أرسلنا رابط التأكيد إلى",
            ))
            .size(14)
            .color(palette.muted),
            label(email).size(14),
            Space::with_height(12),
            button(label(language.pick("Sign out", "تسجيل الخروج")).size(14))
                .padding(Padding::from([8, 16]))
                .style(primary_button_style(palette))
                .on_press(Message::SignOut),
        ]
        .spacing(8)
        .align_x(self.start_alignment());

        container(card(content, palette)).center(Length::Fill).into()
    }

    /// Public page plus the inbox overlay.
    pub fn view_public<'a>(
        &'a self,
        screen: Screen,
        params: &'a BTreeMap<String, String>,
        palette: Palette,
    ) -> Element<'a, Message> {
        let language = self.shell.language();

        let mut content = Column::new()
            .push(label(screen.title(language)).size(26).color(palette.primary))
            .push(params_list(params, palette))
            .spacing(12)
            .align_x(self.start_alignment());

        if matches!(screen, Screen::Landing | Screen::Login | Screen::Register) {
            content = content.push(
                button(label(language.pick("Sign in", "تسجيل الدخول")).size(15))
                    .padding(Padding::from([10, 20]))
                    .style(primary_button_style(palette))
                    .on_press(Message::SignIn),
            );
        }
        if screen != Screen::Landing {
            content = content.push(
                button(label(language.pick("Back to home", "العودة للرئيسية")).size(13))
                    .padding(Padding::from([6, 12]))
                    .on_press(Message::Navigate("/landing".to_string())),
            );
        }

        Stack::new()
            .push(container(card(content, palette)).center(Length::Fill))
            .push(self.view_inbox(palette))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Body of a protected screen.
    pub fn view_screen<'a>(
        &'a self,
        screen: Screen,
        params: &'a BTreeMap<String, String>,
        palette: Palette,
    ) -> Element<'a, Message> {
        let language = self.shell.language();

        let content = Column::new()
            .push(label(screen.title(language)).size(24).color(palette.primary))
            .push(
                label(format!("#{}", self.navigator.location()))
                    .size(12)
                    .color(palette.muted),
            )
            .push(params_list(params, palette))
            .spacing(10)
            .align_x(self.start_alignment());

        container(card(content, palette))
            .width(Length::Fill)
            .align_x(self.start_alignment())
            .into()
    }
}

fn params_list<'a>(params: &'a BTreeMap<String, String>, palette: Palette) -> Element<'a, Message> {
    Column::with_children(params.iter().map(|(name, value)| {
        label(format!("{name}: {value}"))
            .size(13)
            .color(palette.section_text)
            .into()
    }))
    .spacing(4)
    .into()
}
