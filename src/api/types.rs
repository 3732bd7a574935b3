//! HTTP Data Types
//!
//! JSON bodies of the public endpoints. Field names follow the portal's
//! existing front end, which reads the Turkish keys.

use serde::{Deserialize, Serialize};

pub const MSG_ASK_QUESTION: &str = "Lütfen bir soru sorunuz.";
pub const MSG_FAREWELL: &str = "Size yardımcı olmaktan mutluluk duydum, tekrar görüşmek üzere.👋";
pub const MSG_NOT_FOUND: &str =
    "Aranan veri seti bulunamadı.🙁 Lütfen daha spesifik bir kelime veya terim kullanmayı deneyin.";
pub const MSG_FALLBACK: &str =
    "Sanırım bir sorun yaşıyorsunuz, Başlıklar ile eşleşen bir kayıt bulamıyorum.:";
pub const MSG_WELCOME: &str = "Merhaba, İzmir Büyükşehir Belediyesi Açık Veri Portalı içerisinde veri setlerini kolayca bulmanı sağlamak için buradayım !😊\n\
Lütfen ilgilendiğiniz konuyu tek kelime ile ifade edin:\n\
Örneğin: 'İzmirim Kart'\n\n\
Eğer veri talebinde bulunmak isterseniz ana menü üzerinde yer alan 'Veri isteği' alanından bizlere istek gönderebilirsiniz.\n";

#[derive(Debug, Default, Deserialize)]
pub struct QuestionRequest {
    pub user_question: Option<String>,
}

/// Body of every `/api` response. Absent fields are omitted.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "Answer", skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<AnswerItem>>,
}

impl QuestionResponse {
    pub fn message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            answer: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerItem {
    /// A substring hit, or an example topic (without link) on fallback.
    Topic {
        #[serde(rename = "Konu_Basligi")]
        title: String,
        #[serde(rename = "Link", skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    /// A similarity hit.
    Dataset {
        #[serde(rename = "Veri_Seti")]
        name: String,
        #[serde(rename = "Link")]
        link: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub greeting: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
