//! Prompt texts sent to the model
//!
//! The product speaks Brazilian Portuguese, so do the prompts. JSON keys are
//! fixed here and must match the records in [`super::types`].

pub const SHOPPING_LIST_SYSTEM: &str =
    "Você é o Mestre do Churrasco. Responda sempre com um único objeto JSON válido, sem markdown.";

pub const CHARGE_SYSTEM: &str =
    "Você é um amigo brasileiro bem-humorado cobrando a galera depois do churrasco.";

pub const OVERDUE_SYSTEM: &str =
    "Você é o rei da zoeira cobrando quem ainda não pagou a parte do churrasco.";

pub fn shopping_list(description: &str) -> String {
    format!(
        r#"Você é especialista em churrasco brasileiro: carnes, bebidas e quantidades.

Descrição do evento feita pelo usuário:
"{description}"

Considere o contexto (quantidade de pessoas, duração, se a turma bebe muito ou pouco, adultos e crianças) e calcule as quantidades.

Regras de cálculo:
- Carne: 400g por homem, 300g por mulher, 200g por criança
- Evento com mais de 4 horas: acrescente 20%
- Cerveja: 1 litro por pessoa que bebe (1,5 litro se a turma bebe muito)
- Refrigerante: 500ml por pessoa
- Água: 500ml por pessoa
- Carvão: 1kg para cada 2kg de carne
- Pão de alho: 2 unidades por pessoa
- Gelo: 2kg para cada 5 pessoas

Responda somente com um objeto JSON neste formato:
{{
  "summary": "resumo divertido e informal do churrasco",
  "people": 10,
  "meats": [{{"item": "Picanha", "quantity": "2kg", "estimated_price": 150.00}}],
  "drinks": [{{"item": "Cerveja lata", "quantity": "24 unidades", "estimated_price": 80.00, "alcoholic": true}}],
  "sides": [{{"item": "Pão de alho", "quantity": "20 unidades", "estimated_price": 25.00}}],
  "charcoal_and_ice": [{{"item": "Carvão", "quantity": "5kg", "estimated_price": 25.00}}],
  "estimated_total": 280.00
}}"#
    )
}

pub const RECEIPT: &str = r#"Leia esta nota fiscal ou cupom de supermercado e extraia TODOS os itens com seus preços.

Marque cada item com:
- "alcoholic": true para bebida alcoólica (cerveja, vinho, vodka, whisky, cachaça etc.)
- "alcoholic": false para todo o resto

Responda somente com um objeto JSON neste formato:
{
  "items": [
    {"name": "PICANHA KG", "price": 89.90, "alcoholic": false},
    {"name": "BRAHMA LATA 350ML", "price": 3.50, "alcoholic": true}
  ],
  "receipt_total": 93.40,
  "alcoholic_total": 3.50,
  "non_alcoholic_total": 89.90
}

Se algum valor estiver ilegível, faça a melhor estimativa.
Se a imagem não for uma nota fiscal, responda: {"error": "Não consegui identificar uma nota fiscal nesta imagem"}"#;

pub fn charge(name: &str, amount: f64, items: &[String], pix_key: &str) -> String {
    let items_line = if items.is_empty() {
        String::new()
    } else {
        let shown: Vec<&str> = items.iter().take(5).map(String::as_str).collect();
        format!("Itens do rolê: {}\n", shown.join(", "))
    };

    format!(
        r#"Escreva uma mensagem de cobrança engraçada, no tom informal de um amigo cobrando outro depois do churrasco.

Nome: {name}
Valor: R$ {amount:.2}
{items_line}Chave Pix: {pix_key}

A mensagem deve:
- ser divertida e amigável
- citar o valor exato
- incluir a chave Pix
- usar emojis
- não ser ofensiva
- ter no máximo 4 linhas

Responda apenas com a mensagem, sem aspas."#
    )
}

pub fn overdue_charge(name: &str, amount: f64, days_late: u32) -> String {
    format!(
        r#"Escreva uma mensagem MUITO engraçada cobrando um caloteiro depois do churrasco.

Nome: {name}
Valor: R$ {amount:.2}
Dias de atraso: {days_late}

A mensagem deve:
- ser zoeira de amigos
- fazer pressão cômica (ameaçar contar para a turma, por exemplo)
- usar gírias brasileiras e emojis
- não ser ofensiva de verdade
- ter no máximo 5 linhas

Responda apenas com a mensagem, sem aspas."#
    )
}
