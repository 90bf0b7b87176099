//! Layers drawn above the routed content: inbox, onboarding tour and the
//! coach edit overlay.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{Space, button, column, container, mouse_area, scrollable};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};

use super::label;
use crate::app::{App, Message};
use crate::theme::Palette;

const TOUR_STEPS: [(&str, &str); 3] = [
    (
        "Use the menu to move between plans, coaching and the community.",
        "استخدم القائمة للتنقل بين الخطط والتدريب والمجتمع.",
    ),
    (
        "Your plan lives under the plan creator; old workout links open it too.",
        "خطتك موجودة في منشئ الخطة، وروابط التمارين القديمة تفتحه أيضا.",
    ),
    (
        "Switch language from the header at any time.",
        "يمكنك تغيير اللغة من الشريط العلوي في أي وقت.",
    ),
];

fn round_button_style(palette: Palette) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_, status| {
        let bg = match status {
            button::Status::Hovered => palette.primary_light,
            _ => palette.primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: Color::WHITE,
            border: Border {
                radius: 20.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn panel_style(palette: Palette) -> impl Fn(&Theme) -> container::Style {
    move |_| container::Style {
        background: Some(Background::Color(palette.post_background)),
        text_color: Some(palette.post_text),
        border: Border {
            color: palette.primary,
            width: 1.0,
            radius: 10.0.into(),
        },
        ..Default::default()
    }
}

impl App {
    /// Mail inbox launcher, pinned to the reading end corner.
    pub fn view_inbox(&self, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        let end = match self.start_alignment() {
            Horizontal::Right => Horizontal::Left,
            _ => Horizontal::Right,
        };

        let launcher = button(label("✉").size(18))
            .padding(Padding::from([8, 12]))
            .style(round_button_style(palette))
            .on_press(Message::ToggleInbox);

        let mut content = column![].spacing(8).align_x(end);
        if self.inbox_open {
            content = content.push(
                container(
                    column![
                        label(language.pick("Inbox", "البريد الوارد")).size(16),
                        label(language.pick("No new messages", "لا توجد رسائل جديدة"))
                            .size(13)
                            .color(palette.muted),
                    ]
                    .spacing(6),
                )
                .padding(16)
                .width(260)
                .style(panel_style(palette)),
            );
        }
        content = content.push(launcher);

        // Bottom padding clears the bottom navigation bar.
        let bottom = if self.is_compact() { 72.0 } else { 24.0 };
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding {
                top: 0.0,
                right: 24.0,
                bottom,
                left: 24.0,
            })
            .align_x(end)
            .align_y(Vertical::Bottom)
            .into()
    }

    /// First-visit tour for new users.
    pub fn view_onboarding(&self, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();

        let mut steps = column![
            label(language.pick("Welcome to FitCoach", "مرحبا بك في FitCoach")).size(22)
        ]
        .spacing(10)
        .align_x(self.start_alignment());
        for (index, (en, ar)) in TOUR_STEPS.iter().enumerate() {
            steps = steps.push(label(format!("{}. {}", index + 1, language.pick(en, ar))).size(14));
        }
        steps = steps.push(Space::with_height(8)).push(
            button(label(language.pick("Got it", "فهمت")).size(14))
                .padding(Padding::from([8, 18]))
                .style(round_button_style(palette))
                .on_press(Message::FinishOnboarding),
        );

        let dialog = container(steps)
            .padding(24)
            .max_width(480.0)
            .style(panel_style(palette));

        mouse_area(
            container(dialog)
                .center(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.5))),
                    ..Default::default()
                }),
        )
        .on_press(Message::FinishOnboarding)
        .into()
    }

    /// Coach edit layer: shows the live style variables.
    pub fn view_edit_overlay(&self, palette: Palette) -> Element<'_, Message> {
        let language = self.shell.language();
        let css = self.shell.styles().to_css();

        let panel = container(
            column![
                label(language.pick("Edit mode", "وضع التحرير")).size(16).color(palette.primary),
                label(language.pick(
                    "Changes published to the settings file apply live.",
                    "التغييرات المنشورة في ملف الإعدادات تطبق مباشرة.",
                ))
                .size(12)
                .color(palette.muted),
                scrollable(label(css).size(11).font(Font::MONOSPACE)).height(220),
                button(label(language.pick("Close", "إغلاق")).size(12))
                    .padding(Padding::from([4, 12]))
                    .style(round_button_style(palette))
                    .on_press(Message::ToggleEditMode),
            ]
            .spacing(8),
        )
        .padding(16)
        .width(320)
        .style(panel_style(palette));

        container(panel)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding::from([72, 24]))
            .align_x(self.start_alignment())
            .align_y(Vertical::Top)
            .into()
    }
}
