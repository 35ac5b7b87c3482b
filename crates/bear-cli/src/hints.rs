use owo_colors::OwoColorize;

/// Prints a short follow-up hint for common translator errors, keyed on the
/// message text. Silent for everything else.
pub fn provide_error_hint(err_msg: &str) {
    if err_msg.contains("Несогласованный отступ") {
        eprintln!(
            "{}",
            "Подсказка: один уровень отступа — четыре пробела или одна табуляция; при возврате уровень должен совпасть с одним из внешних блоков.".yellow()
        );
    } else if err_msg.contains("Незакрытая строка")
        || err_msg.contains("переноситься на новую строку")
    {
        eprintln!(
            "{}",
            "Подсказка: строка открывается и закрывается кавычкой \" на одной строке; перенос записывается как \\n.".yellow()
        );
    } else if err_msg.contains("escape-последовательность") {
        eprintln!(
            "{}",
            "Подсказка: внутри строк допустимы только \\\\, \\\", \\n и \\t.".yellow()
        );
    } else if err_msg.contains("Ожидается '=' в присваивании") {
        eprintln!(
            "{}",
            "Подсказка: '=' присваивает значение, '==' сравнивает.".yellow()
        );
    } else if err_msg.contains("Ожидается '(' после") {
        eprintln!(
            "{}",
            "Подсказка: условие пишется в скобках, например: если (x > 0)".yellow()
        );
    } else if err_msg.contains("цикла 'для'") || err_msg.contains("в цикле") {
        eprintln!(
            "{}",
            "Подсказка: заголовок цикла выглядит так: для (целое i от 1 до 10)".yellow()
        );
    } else if err_msg.contains("Ожидается отступ") {
        eprintln!(
            "{}",
            "Подсказка: тело условия или цикла записывается со следующей строки с отступом.".yellow()
        );
    }
}
